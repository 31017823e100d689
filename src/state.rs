use std::collections::VecDeque;

use serde::Serialize;
use serde_json::Value;

use crate::catalog;

/// Body sent to both prediction endpoints. Teams travel as codes, the venue
/// as the raw display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictRequest {
    pub team1: String,
    pub team2: String,
    pub venue: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPrediction {
    pub team1: String,
    pub team2: String,
    // Keyed by whatever the service uses for team identity, in response order.
    pub win_probability: Vec<(String, String)>,
    pub predicted_score: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPlayer {
    pub name: String,
    pub probability: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub team1: String,
    pub team2: String,
    pub win_probability: Vec<(String, String)>,
    pub predicted_score: String,
    /// `None` when the players response carried no `key_players` mapping.
    pub key_players: Option<Vec<KeyPlayer>>,
    pub venue: String,
    pub predicted_at: String,
}

impl PredictionResult {
    pub fn win_probability_for(&self, team: &str) -> Option<&str> {
        self.win_probability
            .iter()
            .find(|(key, _)| key == team)
            .map(|(_, prob)| prob.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Team1,
    Team2,
    Venue,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Team1,
        FormField::Team2,
        FormField::Venue,
        FormField::Submit,
    ];

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Team1 => "Select Team 1",
            FormField::Team2 => "Select Team 2",
            FormField::Venue => "Select Venue",
            FormField::Submit => "",
        }
    }

    fn options(self) -> Vec<&'static str> {
        match self {
            FormField::Team1 | FormField::Team2 => catalog::team_names().collect(),
            FormField::Venue => catalog::VENUES.to_vec(),
            FormField::Submit => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading { seq: u64 },
    Success,
    Failure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub venue: Option<String>,
}

impl Selection {
    pub fn is_complete(&self) -> bool {
        self.team1.is_some() && self.team2.is_some() && self.venue.is_some()
    }
}

#[derive(Debug)]
pub enum Delta {
    PredictionSettled {
        seq: u64,
        outcome: Result<PredictionResult, String>,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    Predict { seq: u64, request: PredictRequest },
}

#[derive(Debug)]
pub struct AppState {
    pub selection: Selection,
    pub focus: FormField,
    pub phase: Phase,
    pub prediction: Option<PredictionResult>,
    pub error: Option<String>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    next_seq: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            selection: Selection::default(),
            focus: FormField::Team1,
            phase: Phase::Idle,
            prediction: None,
            error: None,
            logs: VecDeque::new(),
            help_overlay: false,
            next_seq: 1,
        }
    }

    pub fn select_team1(&mut self, name: impl Into<String>) {
        self.selection.team1 = non_empty(name.into());
    }

    pub fn select_team2(&mut self, name: impl Into<String>) {
        self.selection.team2 = non_empty(name.into());
    }

    pub fn select_venue(&mut self, name: impl Into<String>) {
        self.selection.venue = non_empty(name.into());
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn can_submit(&self) -> bool {
        self.selection.is_complete() && !self.is_loading()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Predicting..."
        } else {
            "Predict"
        }
    }

    pub fn selected_value(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Team1 => self.selection.team1.as_deref(),
            FormField::Team2 => self.selection.team2.as_deref(),
            FormField::Venue => self.selection.venue.as_deref(),
            FormField::Submit => None,
        }
    }

    pub fn field_label(&self, field: FormField) -> &str {
        self.selected_value(field)
            .unwrap_or_else(|| field.placeholder())
    }

    pub fn focus_next(&mut self) {
        let idx = self.focus_index();
        self.focus = FormField::ALL[(idx + 1) % FormField::ALL.len()];
    }

    pub fn focus_prev(&mut self) {
        let idx = self.focus_index();
        let len = FormField::ALL.len();
        self.focus = FormField::ALL[(idx + len - 1) % len];
    }

    fn focus_index(&self) -> usize {
        FormField::ALL
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0)
    }

    /// Steps the focused selector through its option list. Slot zero is the
    /// unset placeholder. Selectors are locked while a request is in flight.
    pub fn cycle_focused(&mut self, step: isize) {
        if self.is_loading() || self.focus == FormField::Submit {
            return;
        }
        let options = self.focus.options();
        let slots = options.len() as isize + 1;
        let current = self
            .selected_value(self.focus)
            .and_then(|value| options.iter().position(|opt| *opt == value))
            .map(|pos| pos as isize + 1)
            .unwrap_or(0);
        let next = (current + step).rem_euclid(slots) as usize;
        let value = if next == 0 { "" } else { options[next - 1] };
        match self.focus {
            FormField::Team1 => self.select_team1(value),
            FormField::Team2 => self.select_team2(value),
            FormField::Venue => self.select_venue(value),
            FormField::Submit => {}
        }
    }

    /// Moves into the loading phase and returns the command to dispatch, or
    /// `None` when nothing should be sent.
    pub fn begin_submit(&mut self) -> Option<ProviderCommand> {
        if !self.can_submit() {
            return None;
        }
        let (Some(team1), Some(team2), Some(venue)) = (
            self.selection.team1.clone(),
            self.selection.team2.clone(),
            self.selection.venue.clone(),
        ) else {
            return None;
        };

        let codes = catalog::abbreviation(&team1)
            .ok_or_else(|| format!("Unknown team: {team1}"))
            .and_then(|a| {
                catalog::abbreviation(&team2)
                    .map(|b| (a, b))
                    .ok_or_else(|| format!("Unknown team: {team2}"))
            });
        let (code1, code2) = match codes {
            Ok(codes) => codes,
            Err(msg) => {
                self.push_log(format!("[WARN] {msg}"));
                self.error = Some(msg);
                self.phase = Phase::Failure;
                return None;
            }
        };

        if team1 == team2 {
            self.push_log("[WARN] Team 1 and Team 2 are the same team");
        }
        if !catalog::is_known_venue(&venue) {
            self.push_log(format!("[WARN] Venue not in list: {venue}"));
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.phase = Phase::Loading { seq };
        self.push_log(format!("[INFO] Predicting {code1} vs {code2} at {venue}"));

        Some(ProviderCommand::Predict {
            seq,
            request: PredictRequest {
                team1: code1.to_string(),
                team2: code2.to_string(),
                venue,
            },
        })
    }

    /// Text for the error block, if an error is stored.
    pub fn error_text(&self) -> Option<String> {
        self.error.as_deref().map(error_display_text)
    }

    /// The error block and the result panel are never shown together; a
    /// stale prediction stays in state until a later success replaces it.
    pub fn visible_prediction(&self) -> Option<&PredictionResult> {
        if self.error.is_some() {
            return None;
        }
        self.prediction.as_ref()
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::PredictionSettled { seq, outcome } => {
            if state.phase != (Phase::Loading { seq }) {
                state.push_log(format!("[INFO] Ignoring stale prediction #{seq}"));
                return;
            }
            match outcome {
                Ok(result) => {
                    state.push_log(format!(
                        "[INFO] Prediction #{seq}: {} vs {}",
                        result.team1, result.team2
                    ));
                    state.prediction = Some(result);
                    state.error = None;
                    state.phase = Phase::Success;
                }
                Err(msg) => {
                    state.push_log(format!("[WARN] Prediction #{seq} failed: {msg}"));
                    state.error = Some(msg);
                    state.phase = Phase::Failure;
                }
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

/// Resolves a stored error string for display: a JSON object with a string
/// `error` field yields that field, anything else is shown verbatim.
pub fn error_display_text(stored: &str) -> String {
    match serde_json::from_str::<Value>(stored.trim()) {
        Ok(Value::Object(map)) => match map.get("error") {
            Some(Value::String(msg)) => msg.clone(),
            _ => stored.to_string(),
        },
        _ => stored.to_string(),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Fill ratio for a meter driven by a percentage string such as `"73%"` or
/// `" 61.5 % "`. Anything that is not a percentage leaves the meter empty.
pub fn meter_ratio(probability: &str) -> f64 {
    let Some(number) = probability.trim().strip_suffix('%') else {
        return 0.0;
    };
    match number.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => (value / 100.0).clamp(0.0, 1.0),
        _ => 0.0,
    }
}
