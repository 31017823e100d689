use std::thread;
use std::time::Duration;

use anyhow::{Result, bail};
use rand::Rng;

use crate::catalog;
use crate::predictor::PredictionService;
use crate::state::{KeyPlayer, MatchPrediction, PredictRequest};

const BATTER_ROLES: [&str; 3] = ["Opener", "No.3", "Finisher"];
const BOWLER_ROLES: [&str; 3] = ["Powerplay Seamer", "Spinner", "Death Bowler"];

/// Offline stand-in for the prediction service. Mirrors its response shapes
/// and its rejection of unknown team codes.
#[derive(Debug, Clone)]
pub struct DemoPredictionService {
    latency_ms: u64,
}

impl Default for DemoPredictionService {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoPredictionService {
    pub fn new() -> Self {
        Self { latency_ms: 350 }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency_ms: u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
        }
    }

    fn simulate_latency(&self) {
        if self.latency_ms == 0 {
            return;
        }
        let jitter = rand::thread_rng().gen_range(0..=self.latency_ms);
        thread::sleep(Duration::from_millis(
            self.latency_ms.saturating_add(jitter / 2),
        ));
    }
}

impl PredictionService for DemoPredictionService {
    fn predict_match(&self, request: &PredictRequest) -> Result<MatchPrediction> {
        validate_codes(request)?;
        self.simulate_latency();

        let mut rng = rand::thread_rng();
        let p_team1: f64 = rng.gen_range(0.30..0.70);
        let score: i32 = rng.gen_range(150..=210);
        Ok(MatchPrediction {
            team1: request.team1.clone(),
            team2: request.team2.clone(),
            win_probability: vec![
                (request.team1.clone(), format!("{:.1}%", p_team1 * 100.0)),
                (request.team2.clone(), format!("{:.1}%", (1.0 - p_team1) * 100.0)),
            ],
            predicted_score: format!("{}-{}", score - 10, score + 10),
        })
    }

    fn predict_players(&self, request: &PredictRequest) -> Result<Option<Vec<KeyPlayer>>> {
        validate_codes(request)?;
        self.simulate_latency();

        let mut rng = rand::thread_rng();
        let mut players = Vec::with_capacity(BATTER_ROLES.len() + BOWLER_ROLES.len());
        // Batters come from team 1 and are kept off the 0%/100% extremes.
        for role in BATTER_ROLES {
            let prob: f64 = rng.gen_range(0.0..100.0);
            players.push(KeyPlayer {
                name: format!("{} {role}", request.team1),
                probability: format!("{:.1}%", prob.clamp(1.0, 99.0)),
            });
        }
        for role in BOWLER_ROLES {
            let prob: f64 = rng.gen_range(5.0..95.0);
            players.push(KeyPlayer {
                name: format!("{} {role}", request.team2),
                probability: format!("{prob:.1}%"),
            });
        }
        Ok(Some(players))
    }
}

fn validate_codes(request: &PredictRequest) -> Result<()> {
    let known = |code: &str| catalog::TEAMS.iter().any(|(_, abbr)| *abbr == code);
    if !known(&request.team1) || !known(&request.team2) {
        bail!("Invalid team name provided");
    }
    Ok(())
}
