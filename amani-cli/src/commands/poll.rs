//! Poll command
//!
//! Registers a throwaway member, probes the champion route, polls the
//! application status until it resolves, then walks the post-approval
//! login path. The Rust port of the deadline-based smoke poll flow.

use std::time::Duration;

use amani_client::{PollBudget, PollOutcome, RegistrationPoller};
use amani_core::domain::member::Credentials;
use amani_core::domain::registration::RegistrationResult;
use amani_core::dto::auth::RegisterRequest;
use amani_core::dto::champion::ChampionSignup;
use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use crate::commands::finish_login;
use crate::config::{self, Config};
use crate::identity;
use crate::output;

/// Arguments for the poll command
#[derive(Args)]
pub struct PollArgs {
    /// Seconds between status polls
    #[arg(long, env = "SMOKE_POLL_INTERVAL", default_value_t = 10)]
    interval_secs: u64,

    /// Total polling budget in seconds
    #[arg(long, env = "SMOKE_TIMEOUT", default_value_t = 60)]
    timeout_secs: u64,

    /// Poll at most this many times instead of using the time budget
    #[arg(long, env = "SMOKE_ATTEMPTS")]
    max_attempts: Option<u32>,

    /// Fixed login username; with --password, login runs even while pending
    #[arg(long, env = "SMOKE_USERNAME")]
    username: Option<String>,

    /// Fixed login password
    #[arg(long, env = "SMOKE_PASSWORD")]
    password: Option<String>,
}

impl PollArgs {
    /// Attempt-count budget when supplied, otherwise the time budget
    fn budget(&self) -> PollBudget {
        match self.max_attempts {
            Some(max) => PollBudget::Attempts(max),
            None => PollBudget::Deadline(Duration::from_secs(self.timeout_secs)),
        }
    }
}

/// Handle the poll command
pub async fn run(api_url: &str, args: PollArgs) -> Result<()> {
    let config = Config::new(
        api_url,
        Duration::from_secs(args.interval_secs),
        args.budget(),
        args.username,
        args.password,
    )?;
    let client = config::portal_client(&config.base_url)?;

    println!("API Base: {}", client.base_url().cyan());

    let request = identity::generate("Smoke Poll User");

    output::section("REGISTER MEMBER");
    let response = client
        .register(&request)
        .await
        .context("register request failed")?;
    output::response(&response);

    output::section("CHAMPION SELF-REGISTER CHECK");
    match client.champion_signup(&champion_probe(&request)).await {
        Ok(probe) => output::response(&probe),
        Err(e) => println!(
            "  {}",
            format!("Champion endpoint check failed: {}", e).yellow()
        ),
    }

    let Some(registration) = RegistrationResult::from_payload(&response.payload) else {
        println!();
        println!("{}", "No registration ID returned. Aborting poll.".yellow());
        return Ok(());
    };

    output::section(&format!(
        "POLL REGISTRATION STATUS (ID: {})",
        registration.registration_id
    ));
    let poller = RegistrationPoller::new(client.clone(), config.interval, config.budget)?;
    let outcome = poller.run(&registration.registration_id).await?;
    print_outcome(&outcome);

    let submitted = Credentials {
        username: request.username.clone(),
        password: request.password.clone(),
    };
    finish_login(
        &client,
        outcome.last.status,
        &submitted,
        config.override_credentials.as_ref(),
    )
    .await;

    Ok(())
}

fn print_outcome(outcome: &PollOutcome) {
    let label = output::colorize_status(outcome.last.status);
    if outcome.terminal {
        println!("  Resolved after {} attempt(s): {}", outcome.attempts, label);
    } else {
        println!(
            "  Budget exhausted after {} attempt(s); last status: {}",
            outcome.attempts, label
        );
    }
}

/// Champion payload mirroring the registered member
fn champion_probe(request: &RegisterRequest) -> ChampionSignup {
    ChampionSignup {
        full_name: request.full_name.clone(),
        dob: "2000-01-01".to_string(),
        gender: "Other".to_string(),
        phone: request.phone_number.clone(),
        consent_obtained: true,
    }
}
