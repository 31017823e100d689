pub mod catalog;
pub mod config;
pub mod fake_predictor;
pub mod http_client;
pub mod predict_fetch;
pub mod predictor;
pub mod state;
