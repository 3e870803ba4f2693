//! Check command
//!
//! Probes the registration route with a fixed debug payload. Deployments
//! fronted by a static host answer unknown `/api` paths with an HTML page;
//! when that happens the probe retries the unprefixed route once.

use amani_client::ApiResponse;
use amani_core::dto::auth::RegisterRequest;
use anyhow::{Context, Result};
use colored::*;

use crate::config;
use crate::output;

/// Handle the check command
pub async fn run(api_url: &str) -> Result<()> {
    let client = config::portal_client(api_url)?;
    let request = debug_payload();

    println!("POST {}/api/auth/register", client.base_url());
    let response = client
        .register(&request)
        .await
        .context("register probe failed")?;
    print_probe("/api/auth/register", &response);

    if !response.is_success() && response.is_html() {
        println!(
            "{}",
            "Primary returned HTML; retrying fallback /auth/register".yellow()
        );
        let fallback = client
            .register_fallback(&request)
            .await
            .context("fallback probe failed")?;
        print_probe("/auth/register", &fallback);
    }

    Ok(())
}

fn print_probe(route: &str, response: &ApiResponse) {
    println!(
        "{} -> {} {}",
        route,
        response.status.as_u16(),
        response.content_type.as_deref().unwrap_or("-").dimmed()
    );
    println!(
        "{}",
        output::preview(&response.payload.to_string(), output::BODY_PREVIEW_CHARS).dimmed()
    );
}

/// Fixed debug identity used by the probe
fn debug_payload() -> RegisterRequest {
    RegisterRequest {
        full_name: "Test User".to_string(),
        username: "testdebug".to_string(),
        phone_number: "+254712345678".to_string(),
        password: "Abcd1234!".to_string(),
        email: Some("test+debug@example.com".to_string()),
    }
}
