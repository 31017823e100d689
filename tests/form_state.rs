use cricsage_terminal::state::{
    AppState, Delta, FormField, Phase, PredictRequest, PredictionResult, ProviderCommand,
    apply_delta,
};

fn ready_state() -> AppState {
    let mut state = AppState::new();
    state.select_team1("Mumbai Indians");
    state.select_team2("Chennai Super Kings");
    state.select_venue("Wankhede Stadium, Mumbai");
    state
}

fn sample_result() -> PredictionResult {
    PredictionResult {
        team1: "MI".to_string(),
        team2: "CSK".to_string(),
        win_probability: vec![
            ("MI".to_string(), "60%".to_string()),
            ("CSK".to_string(), "40%".to_string()),
        ],
        predicted_score: "180-200".to_string(),
        key_players: None,
        venue: "Wankhede Stadium, Mumbai".to_string(),
        predicted_at: "12:00:00".to_string(),
    }
}

fn submit_seq(state: &mut AppState) -> u64 {
    match state.begin_submit().expect("submit should dispatch") {
        ProviderCommand::Predict { seq, .. } => seq,
    }
}

#[test]
fn submit_disabled_until_all_fields_set() {
    let mut state = AppState::new();
    assert!(!state.can_submit());
    state.select_team1("Mumbai Indians");
    assert!(!state.can_submit());
    state.select_team2("Chennai Super Kings");
    assert!(!state.can_submit());
    state.select_venue("Wankhede Stadium, Mumbai");
    assert!(state.can_submit());

    state.select_team2("");
    assert!(!state.can_submit());
    assert!(state.begin_submit().is_none());
    assert_eq!(state.phase, Phase::Idle);
}

#[test]
fn submit_builds_abbreviated_request() {
    let mut state = ready_state();
    let cmd = state.begin_submit().expect("submit should dispatch");
    let ProviderCommand::Predict { request, .. } = cmd;
    assert_eq!(
        request,
        PredictRequest {
            team1: "MI".to_string(),
            team2: "CSK".to_string(),
            venue: "Wankhede Stadium, Mumbai".to_string(),
        }
    );
    let body = serde_json::to_value(&request).expect("serializable");
    assert_eq!(
        body,
        serde_json::json!({"team1": "MI", "team2": "CSK", "venue": "Wankhede Stadium, Mumbai"})
    );
}

#[test]
fn loading_disables_submit_and_locks_selectors() {
    let mut state = ready_state();
    submit_seq(&mut state);
    assert!(state.is_loading());
    assert!(!state.can_submit());
    assert_eq!(state.submit_label(), "Predicting...");
    assert!(state.begin_submit().is_none());

    state.focus = FormField::Team1;
    state.cycle_focused(1);
    assert_eq!(state.selection.team1.as_deref(), Some("Mumbai Indians"));
}

#[test]
fn success_stores_result_and_clears_error() {
    let mut state = ready_state();
    state.error = Some("old failure".to_string());
    let seq = submit_seq(&mut state);

    apply_delta(
        &mut state,
        Delta::PredictionSettled {
            seq,
            outcome: Ok(sample_result()),
        },
    );

    assert!(!state.is_loading());
    assert_eq!(state.phase, Phase::Success);
    assert_eq!(state.submit_label(), "Predict");
    assert!(state.error.is_none());
    assert_eq!(state.visible_prediction(), Some(&sample_result()));
}

#[test]
fn failure_keeps_stale_prediction_but_hides_it() {
    let mut state = ready_state();
    let seq = submit_seq(&mut state);
    apply_delta(
        &mut state,
        Delta::PredictionSettled {
            seq,
            outcome: Ok(sample_result()),
        },
    );

    let seq = submit_seq(&mut state);
    apply_delta(
        &mut state,
        Delta::PredictionSettled {
            seq,
            outcome: Err("invalid venue".to_string()),
        },
    );

    assert_eq!(state.phase, Phase::Failure);
    assert!(!state.is_loading());
    assert!(state.can_submit());
    assert_eq!(state.error_text().as_deref(), Some("invalid venue"));
    assert!(state.prediction.is_some());
    assert!(state.visible_prediction().is_none());
}

#[test]
fn stale_settlement_is_ignored() {
    let mut state = ready_state();
    let seq = submit_seq(&mut state);
    apply_delta(
        &mut state,
        Delta::PredictionSettled {
            seq: seq + 7,
            outcome: Ok(sample_result()),
        },
    );
    assert!(state.is_loading());
    assert!(state.prediction.is_none());
}

#[test]
fn unknown_team_fails_without_dispatch() {
    let mut state = ready_state();
    state.select_team2("Deccan Chargers");
    assert!(state.can_submit());
    assert!(state.begin_submit().is_none());
    assert_eq!(state.phase, Phase::Failure);
    assert_eq!(state.error_text().as_deref(), Some("Unknown team: Deccan Chargers"));
}

#[test]
fn same_team_twice_is_still_submitted() {
    let mut state = ready_state();
    state.select_team2("Mumbai Indians");
    assert!(state.begin_submit().is_some());
    assert!(state.logs.iter().any(|line| line.contains("same team")));
}

#[test]
fn cycling_wraps_through_placeholder() {
    let mut state = AppState::new();
    state.focus = FormField::Team1;
    assert_eq!(state.field_label(FormField::Team1), "Select Team 1");

    state.cycle_focused(1);
    assert_eq!(state.selection.team1.as_deref(), Some("Mumbai Indians"));
    state.cycle_focused(-1);
    assert!(state.selection.team1.is_none());
    state.cycle_focused(-1);
    assert_eq!(state.selection.team1.as_deref(), Some("Sunrisers Hyderabad"));

    state.focus_next();
    state.focus_next();
    assert_eq!(state.focus, FormField::Venue);
    state.cycle_focused(10);
    assert_eq!(state.selection.venue.as_deref(), Some("Wankhede Stadium, Mumbai"));

    state.focus_next();
    state.focus_next();
    assert_eq!(state.focus, FormField::Team1);
    state.focus_prev();
    assert_eq!(state.focus, FormField::Submit);
}
