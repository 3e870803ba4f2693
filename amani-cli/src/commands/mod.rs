//! Commands module
//!
//! Defines all CLI commands and their handlers, plus the login policy the
//! polling and single-pass flows share.

mod check;
mod poll;
mod smoke;

pub use poll::PollArgs;
pub use smoke::SmokeArgs;

use amani_client::PortalClient;
use amani_core::domain::member::Credentials;
use amani_core::domain::registration::RegistrationStatus;
use amani_core::dto::auth::LoginRequest;
use amani_core::extract;
use anyhow::Result;
use clap::Subcommand;
use colored::*;

use crate::output;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Register a member and poll the application until it resolves
    Poll(PollArgs),
    /// Single-pass smoke test of the auth endpoints
    Smoke(SmokeArgs),
    /// Probe the registration route, with the unprefixed fallback
    Check,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, api_url: &str) -> Result<()> {
    match command {
        Commands::Poll(args) => poll::run(api_url, args).await,
        Commands::Smoke(args) => smoke::run(api_url, args).await,
        Commands::Check => check::run(api_url).await,
    }
}

/// Applies the post-poll login policy
///
/// Rejected applications never log in. Approved or Active applications log
/// in with the credentials submitted at registration. Anything still
/// pending (or unreadable) only proceeds when the operator supplied fixed
/// credentials.
pub(crate) async fn finish_login(
    client: &PortalClient,
    status: RegistrationStatus,
    submitted: &Credentials,
    fixed: Option<&Credentials>,
) {
    let Some(credentials) = login_credentials(status, submitted, fixed) else {
        println!();
        let note = if status == RegistrationStatus::Rejected {
            "Registration was rejected. Skipping login.".red()
        } else {
            "Status not approved and no fixed credentials. Skipping login.".yellow()
        };
        println!("{}", note);
        return;
    };

    login_and_fetch_profile(client, credentials).await;
}

/// Which credentials, if any, the login step should use
fn login_credentials<'a>(
    status: RegistrationStatus,
    submitted: &'a Credentials,
    fixed: Option<&'a Credentials>,
) -> Option<&'a Credentials> {
    if status == RegistrationStatus::Rejected {
        return None;
    }

    match (fixed, status.grants_login()) {
        (Some(fixed), _) => Some(fixed),
        (None, true) => Some(submitted),
        (None, false) => None,
    }
}

/// Shared post-approval walk: login, then one authenticated profile fetch
pub(crate) async fn login_and_fetch_profile(client: &PortalClient, credentials: &Credentials) {
    output::section("ATTEMPT LOGIN");
    let response = match client.login(&LoginRequest::from(credentials)).await {
        Ok(response) => response,
        Err(e) => {
            println!("  {}", format!("Login attempt failed: {}", e).red());
            return;
        }
    };
    output::response(&response);

    let Some(token) = extract::bearer_token(&response.payload) else {
        println!(
            "  {}",
            "No token field in login response. Skipping profile fetch.".yellow()
        );
        return;
    };

    output::section("FETCH PROFILE WITH TOKEN");
    match client.fetch_profile(&token).await {
        Ok(profile) => output::response(&profile),
        Err(e) => println!("  {}", format!("Profile fetch failed: {}", e).red()),
    }
}
