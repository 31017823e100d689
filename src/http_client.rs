use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

const USER_AGENT: &str = concat!("cricsage_terminal/", env!("CARGO_PKG_VERSION"));

/// Blocking client with the configured deadline. `None` disables the
/// default reqwest timeout.
pub fn http_client(timeout: Option<Duration>) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("failed to build http client")
}
