use cricsage_terminal::catalog::{
    TEAMS, VENUES, abbreviation, is_known_venue, team_label, team_name, team_names,
};

#[test]
fn catalog_sizes_match_option_lists() {
    assert_eq!(TEAMS.len(), 10);
    assert_eq!(VENUES.len(), 17);
    assert_eq!(team_names().next(), Some("Mumbai Indians"));
}

#[test]
fn abbreviation_maps_display_names() {
    assert_eq!(abbreviation("Mumbai Indians"), Some("MI"));
    assert_eq!(abbreviation("Chennai Super Kings"), Some("CSK"));
    assert_eq!(abbreviation("Punjab Kings"), Some("PBKS"));
    assert_eq!(abbreviation("mumbai indians"), None);
    assert_eq!(abbreviation(""), None);
}

#[test]
fn codes_are_unique_and_reversible() {
    for (name, code) in TEAMS {
        assert_eq!(team_name(code), Some(name));
        assert_eq!(TEAMS.iter().filter(|(_, c)| *c == code).count(), 1);
    }
}

#[test]
fn team_label_decorates_known_codes_only() {
    assert_eq!(team_label("MI"), "Mumbai Indians (MI)");
    assert_eq!(team_label("Some XI"), "Some XI");
}

#[test]
fn venue_membership() {
    assert!(is_known_venue("Wankhede Stadium, Mumbai"));
    assert!(!is_known_venue("Lord's, London"));
}
