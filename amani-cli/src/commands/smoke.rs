//! Smoke command
//!
//! Single pass over the auth surface: register, read the application
//! status once, then walk the login path. No waiting; this is the flow
//! for a quick is-the-backend-alive answer.

use amani_core::domain::member::Credentials;
use amani_core::domain::registration::{RegistrationResult, RegistrationStatus};
use amani_core::extract;
use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use crate::commands::finish_login;
use crate::config;
use crate::identity;
use crate::output;

/// Arguments for the smoke command
#[derive(Args)]
pub struct SmokeArgs {
    /// Fixed login username; with --password, login runs even while pending
    #[arg(long, env = "SMOKE_USERNAME")]
    username: Option<String>,

    /// Fixed login password
    #[arg(long, env = "SMOKE_PASSWORD")]
    password: Option<String>,
}

/// Handle the smoke command
pub async fn run(api_url: &str, args: SmokeArgs) -> Result<()> {
    let fixed = config::pair_credentials(args.username, args.password)?;
    let client = config::portal_client(api_url)?;

    println!("API Base: {}", client.base_url().cyan());

    let request = identity::generate("Smoke Test User");

    output::section("REGISTER");
    let response = client
        .register(&request)
        .await
        .context("register request failed")?;
    output::response(&response);

    let mut status = RegistrationStatus::Unknown;
    match RegistrationResult::from_payload(&response.payload) {
        Some(registration) => {
            output::section("CHECK REGISTRATION STATUS");
            match client
                .registration_status(&registration.registration_id)
                .await
            {
                Ok(check) => {
                    output::response(&check);
                    status = extract::status_label(&check.payload)
                        .as_deref()
                        .map(RegistrationStatus::classify)
                        .unwrap_or(RegistrationStatus::Unknown);
                }
                Err(e) => println!("  {}", format!("Status check failed: {}", e).red()),
            }
        }
        None => {
            println!();
            println!("{}", "No registration ID returned.".yellow());
        }
    }

    let submitted = Credentials {
        username: request.username.clone(),
        password: request.password.clone(),
    };
    finish_login(&client, status, &submitted, fixed.as_ref()).await;

    output::section("SMOKE TEST DONE");

    Ok(())
}
