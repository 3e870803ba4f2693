//! Terminal output helpers shared by the smoke commands

use amani_client::ApiResponse;
use amani_core::domain::registration::RegistrationStatus;
use amani_core::extract::Payload;
use colored::*;

/// Longest body excerpt worth printing
pub const BODY_PREVIEW_CHARS: usize = 1000;

/// Prints a section banner
pub fn section(title: &str) {
    println!();
    println!("{}", format!("--- {} ---", title).bold());
}

/// Prints a response status line and body
pub fn response(response: &ApiResponse) {
    let code = response.status.as_u16().to_string();
    let code = if response.is_success() {
        code.green()
    } else {
        code.red()
    };
    println!("  Status: {}", code);

    match &response.payload {
        Payload::Json(value) => {
            if let Ok(pretty) = serde_json::to_string_pretty(value) {
                println!("  Body:   {}", pretty.dimmed());
            } else {
                println!("  Body:   {}", value.to_string().dimmed());
            }
        }
        Payload::Raw(text) => {
            println!("  Body:   {}", preview(text, BODY_PREVIEW_CHARS).dimmed());
        }
    }
}

/// Truncates a body to a printable excerpt
pub fn preview(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Colorize a registration status for display
pub fn colorize_status(status: RegistrationStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        RegistrationStatus::Approved | RegistrationStatus::Active => label.green(),
        RegistrationStatus::Rejected => label.red(),
        RegistrationStatus::Pending => label.yellow(),
        RegistrationStatus::Unknown => label.dimmed(),
    }
}
