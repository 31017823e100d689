use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Instant;

use anyhow::Result;
use chrono::Local;

use crate::config::{PredictorConfig, PredictorSource};
use crate::fake_predictor::DemoPredictionService;
use crate::predict_fetch::HttpPredictionService;
use crate::state::{
    Delta, KeyPlayer, MatchPrediction, PredictRequest, PredictionResult, ProviderCommand,
};

/// The two calls a submission makes. Implementations must be callable from
/// two threads at once.
pub trait PredictionService: Send + Sync {
    fn predict_match(&self, request: &PredictRequest) -> Result<MatchPrediction>;
    fn predict_players(&self, request: &PredictRequest) -> Result<Option<Vec<KeyPlayer>>>;
}

/// Runs both calls concurrently and waits for both. Either failure fails the
/// whole submission; when both fail the match error is reported.
pub fn run_prediction(
    service: &dyn PredictionService,
    request: &PredictRequest,
) -> Result<PredictionResult, String> {
    let (matched, players) = rayon::join(
        || service.predict_match(request),
        || service.predict_players(request),
    );
    let matched = matched.map_err(|err| format!("{err:#}"))?;
    let players = players.map_err(|err| format!("{err:#}"))?;
    Ok(merge_prediction(matched, players, &request.venue))
}

pub fn merge_prediction(
    matched: MatchPrediction,
    key_players: Option<Vec<KeyPlayer>>,
    venue: &str,
) -> PredictionResult {
    PredictionResult {
        team1: matched.team1,
        team2: matched.team2,
        win_probability: matched.win_probability,
        predicted_score: matched.predicted_score,
        key_players,
        venue: venue.to_string(),
        predicted_at: Local::now().format("%H:%M:%S").to_string(),
    }
}

pub fn build_service(config: &PredictorConfig) -> Result<Box<dyn PredictionService>> {
    match config.source {
        PredictorSource::Http => Ok(Box::new(HttpPredictionService::new(config)?)),
        PredictorSource::Demo => Ok(Box::new(DemoPredictionService::new())),
    }
}

pub fn spawn_provider(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    config: PredictorConfig,
) {
    thread::spawn(move || {
        let pool = build_join_pool(config.threads);
        let service = build_service(&config);
        match &service {
            Ok(_) => {
                let target = match config.source {
                    PredictorSource::Http => config.base_url.clone(),
                    PredictorSource::Demo => "demo predictor".to_string(),
                };
                let _ = tx.send(Delta::Log(format!("[INFO] Prediction source: {target}")));
            }
            Err(err) => {
                let _ = tx.send(Delta::Log(format!("[WARN] Prediction service error: {err:#}")));
            }
        }

        for cmd in cmd_rx {
            match cmd {
                ProviderCommand::Predict { seq, request } => {
                    let started = Instant::now();
                    let outcome = match &service {
                        Ok(service) => with_join_pool(&pool, || {
                            run_prediction(service.as_ref(), &request)
                        }),
                        Err(err) => Err(format!("{err:#}")),
                    };
                    let _ = tx.send(Delta::Log(format!(
                        "[INFO] Prediction #{seq} settled in {}ms",
                        started.elapsed().as_millis()
                    )));
                    if tx.send(Delta::PredictionSettled { seq, outcome }).is_err() {
                        return;
                    }
                }
            }
        }
    });
}

fn build_join_pool(threads: usize) -> Option<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .ok()
}

fn with_join_pool<T>(pool: &Option<rayon::ThreadPool>, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    if let Some(pool) = pool.as_ref() {
        pool.install(action)
    } else {
        action()
    }
}
