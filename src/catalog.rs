/// Teams in option-list order, display name paired with the code the
/// prediction service expects.
pub const TEAMS: [(&str, &str); 10] = [
    ("Mumbai Indians", "MI"),
    ("Chennai Super Kings", "CSK"),
    ("Royal Challengers Bangalore", "RCB"),
    ("Kolkata Knight Riders", "KKR"),
    ("Rajasthan Royals", "RR"),
    ("Delhi Capitals", "DC"),
    ("Gujarat Titans", "GT"),
    ("Lucknow Super Giants", "LSG"),
    ("Punjab Kings", "PBKS"),
    ("Sunrisers Hyderabad", "SRH"),
];

pub const VENUES: [&str; 17] = [
    "MA Chidambaram Stadium, Chennai",
    "Maharaja Yadavindra Singh International Cricket Stadium, Mullanpur, Chandigarh",
    "Eden Gardens, Kolkata",
    "Sawai Mansingh Stadium, Jaipur",
    "Narendra Modi Stadium, Ahmedabad",
    "M.Chinnaswamy Stadium, Bengaluru",
    "Rajiv Gandhi International Stadium, Hyderabad",
    "Bharat Ratna Shri Atal Bihari Vajpayee Ekana Cricket Stadium, Lucknow",
    "Dr. Y.S. Rajasekhara Reddy ACA-VDCA Cricket Stadium, Visakhapatnam",
    "Wankhede Stadium, Mumbai",
    "Arun Jaitley Stadium, Delhi",
    "Himachal Pradesh Cricket Association Stadium, Dharamsala",
    "Barsapara Cricket Stadium, Guwahati",
    "Punjab Cricket Association IS Bindra Stadium, Mohali",
    "Brabourne Stadium, Mumbai",
    "Dr DY Patil Sports Academy, Mumbai",
    "Maharashtra Cricket Association Stadium, Pune",
];

pub fn team_names() -> impl Iterator<Item = &'static str> {
    TEAMS.iter().map(|(name, _)| *name)
}

/// Exact, case-sensitive lookup of a display name.
pub fn abbreviation(name: &str) -> Option<&'static str> {
    TEAMS
        .iter()
        .find(|(team, _)| *team == name)
        .map(|(_, code)| *code)
}

pub fn team_name(code: &str) -> Option<&'static str> {
    TEAMS
        .iter()
        .find(|(_, abbr)| abbr.eq_ignore_ascii_case(code.trim()))
        .map(|(name, _)| *name)
}

/// Display label for a team identifier returned by the service, which may be
/// either a code or a full name.
pub fn team_label(raw: &str) -> String {
    match team_name(raw) {
        Some(name) => format!("{name} ({})", raw.trim()),
        None => raw.to_string(),
    }
}

pub fn is_known_venue(venue: &str) -> bool {
    VENUES.contains(&venue)
}
