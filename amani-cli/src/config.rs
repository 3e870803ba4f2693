//! Configuration module
//!
//! Assembles and validates the settings shared by the smoke commands:
//! portal URL, polling budget, and optional operator-supplied credentials.

use std::time::Duration;

use amani_client::{PollBudget, PortalClient};
use amani_core::domain::member::Credentials;
use anyhow::Result;

/// Request timeout applied to every portal call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a polling smoke run
#[derive(Debug, Clone)]
pub struct Config {
    /// Portal API base URL
    pub base_url: String,
    /// Fixed delay between poll attempts
    pub interval: Duration,
    /// Poll budget: wall-clock deadline, or attempt count when supplied
    pub budget: PollBudget,
    /// Operator-supplied login credentials; these bypass the pending-skip
    pub override_credentials: Option<Credentials>,
}

impl Config {
    /// Builds and validates a poll configuration
    pub fn new(
        base_url: &str,
        interval: Duration,
        budget: PollBudget,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self> {
        let config = Self {
            base_url: base_url.to_string(),
            interval,
            budget,
            override_credentials: pair_credentials(username, password)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            anyhow::bail!("poll interval must be greater than 0");
        }
        if self.budget.is_empty() {
            anyhow::bail!("poll budget must allow at least one attempt");
        }

        Ok(())
    }
}

/// Builds the portal client with the standard request timeout
pub fn portal_client(base_url: &str) -> Result<PortalClient> {
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        anyhow::bail!("api url must start with http:// or https://");
    }

    let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    Ok(PortalClient::with_client(base_url, http))
}

/// Builds the optional fixed credentials; they must come as a pair
pub fn pair_credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<Option<Credentials>> {
    match (username, password) {
        (Some(username), Some(password)) => Ok(Some(Credentials { username, password })),
        (None, None) => Ok(None),
        _ => anyhow::bail!("SMOKE_USERNAME and SMOKE_PASSWORD must be supplied together"),
    }
}
