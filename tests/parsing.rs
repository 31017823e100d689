use cricsage_terminal::predict_fetch::{
    failure_message, parse_match_prediction_json, parse_player_prediction_json,
};
use cricsage_terminal::state::error_display_text;

#[test]
fn parses_match_prediction() {
    let raw = r#"{"team1":"MI","team2":"CSK","winProbability":{"MI":"60%","CSK":"40%"},"predictedScore":"180-200"}"#;
    let m = parse_match_prediction_json(raw).expect("fixture should parse");
    assert_eq!(m.team1, "MI");
    assert_eq!(m.team2, "CSK");
    assert_eq!(
        m.win_probability,
        vec![
            ("MI".to_string(), "60%".to_string()),
            ("CSK".to_string(), "40%".to_string()),
        ]
    );
    assert_eq!(m.predicted_score, "180-200");
}

#[test]
fn match_prediction_missing_fields_default_to_empty() {
    let m = parse_match_prediction_json("{}").expect("empty object should parse");
    assert!(m.team1.is_empty());
    assert!(m.win_probability.is_empty());
    assert!(m.predicted_score.is_empty());
}

#[test]
fn match_prediction_rejects_non_object() {
    assert!(parse_match_prediction_json("[1,2]").is_err());
    let err = parse_match_prediction_json("<html>").expect_err("html is not json");
    assert!(format!("{err:#}").starts_with("invalid predict response"));
}

#[test]
fn parses_key_players_in_response_order() {
    let raw = r#"{"key_players":{"V Kohli":"75%","J Bumrah":"12.5%","A Russell":"40%"}}"#;
    let players = parse_player_prediction_json(raw)
        .expect("fixture should parse")
        .expect("key_players present");
    let names: Vec<_> = players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["V Kohli", "J Bumrah", "A Russell"]);
    assert_eq!(players[1].probability, "12.5%");
}

#[test]
fn missing_key_players_is_none() {
    assert!(parse_player_prediction_json("{}").expect("parse").is_none());
    assert!(parse_player_prediction_json("null").expect("parse").is_none());
    assert!(
        parse_player_prediction_json(r#"{"key_players":{}}"#)
            .expect("parse")
            .is_some_and(|p| p.is_empty())
    );
}

#[test]
fn failure_message_prefers_error_field() {
    assert_eq!(failure_message(400, r#"{"error":"invalid venue"}"#), "invalid venue");
    assert_eq!(
        failure_message(500, r#"{"error":"boom","message":"Prediction failed"}"#),
        "boom"
    );
}

#[test]
fn failure_message_falls_back_to_status() {
    assert_eq!(
        failure_message(502, "<html>Bad Gateway</html>"),
        "Request failed with status code 502"
    );
    assert_eq!(
        failure_message(500, r#"{"message":"x"}"#),
        "Request failed with status code 500"
    );
}

#[test]
fn error_display_decodes_json_or_shows_raw() {
    assert_eq!(error_display_text(r#"{"error":"invalid venue"}"#), "invalid venue");
    assert_eq!(error_display_text("invalid venue"), "invalid venue");
    assert_eq!(error_display_text("weird {brace} text"), "weird {brace} text");
}
