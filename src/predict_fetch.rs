use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::{Map, Value};

use crate::config::PredictorConfig;
use crate::http_client::http_client;
use crate::predictor::PredictionService;
use crate::state::{KeyPlayer, MatchPrediction, PredictRequest};

pub struct HttpPredictionService {
    client: Client,
    predict_url: String,
    players_url: String,
}

impl HttpPredictionService {
    pub fn new(config: &PredictorConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config.timeout)?,
            predict_url: config.predict_url(),
            players_url: config.predict_players_url(),
        })
    }

    fn post_json(&self, url: &str, request: &PredictRequest) -> Result<String> {
        let resp = self
            .client
            .post(url)
            .json(request)
            .send()
            .context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            return Err(anyhow::Error::msg(failure_message(status.as_u16(), &body)));
        }
        Ok(body)
    }
}

impl PredictionService for HttpPredictionService {
    fn predict_match(&self, request: &PredictRequest) -> Result<MatchPrediction> {
        let body = self.post_json(&self.predict_url, request)?;
        parse_match_prediction_json(&body)
    }

    fn predict_players(&self, request: &PredictRequest) -> Result<Option<Vec<KeyPlayer>>> {
        let body = self.post_json(&self.players_url, request)?;
        parse_player_prediction_json(&body)
    }
}

/// Message for a non-2xx response: the body's `error` field when it carries
/// one, otherwise a generic status line.
pub fn failure_message(status: u16, body: &str) -> String {
    let nested = serde_json::from_str::<Value>(body.trim())
        .ok()
        .and_then(|root| root.get("error").and_then(Value::as_str).map(str::to_string));
    nested.unwrap_or_else(|| format!("Request failed with status code {status}"))
}

pub fn parse_match_prediction_json(raw: &str) -> Result<MatchPrediction> {
    let root: Value =
        serde_json::from_str(raw.trim()).context("invalid predict response")?;
    let Value::Object(root) = root else {
        anyhow::bail!("invalid predict response: expected an object");
    };

    Ok(MatchPrediction {
        team1: root.get("team1").map(value_text).unwrap_or_default(),
        team2: root.get("team2").map(value_text).unwrap_or_default(),
        win_probability: root
            .get("winProbability")
            .and_then(Value::as_object)
            .map(entries)
            .unwrap_or_default(),
        predicted_score: root.get("predictedScore").map(value_text).unwrap_or_default(),
    })
}

pub fn parse_player_prediction_json(raw: &str) -> Result<Option<Vec<KeyPlayer>>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid predict_players response")?;
    let players = root
        .get("key_players")
        .and_then(Value::as_object)
        .map(|map| {
            entries(map)
                .into_iter()
                .map(|(name, probability)| KeyPlayer { name, probability })
                .collect()
        });
    Ok(players)
}

fn entries(map: &Map<String, Value>) -> Vec<(String, String)> {
    map.iter()
        .map(|(key, value)| (key.clone(), value_text(value)))
        .collect()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
