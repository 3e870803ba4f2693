//! Amani Portal HTTP Client
//!
//! A thin, forgiving HTTP client for the Amani membership API.
//!
//! This crate provides the request plumbing and the registration status
//! poller shared by all the smoke commands, so the polling logic lives in
//! exactly one place.
//!
//! The portal's consumed contract is loose: any status code, JSON or raw
//! text bodies, identifiers and tokens under several possible field names.
//! Endpoint methods therefore return an [`ApiResponse`] rather than typed
//! bodies, and only transport failures surface as errors.
//!
//! # Example
//!
//! ```no_run
//! use amani_client::PortalClient;
//! use amani_core::dto::auth::RegisterRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PortalClient::new("http://127.0.0.1:5000");
//!
//!     let response = client
//!         .register(&RegisterRequest {
//!             full_name: "Test User".to_string(),
//!             username: "testuser".to_string(),
//!             phone_number: "+254712345678".to_string(),
//!             password: "TestPass123!".to_string(),
//!             email: None,
//!         })
//!         .await?;
//!
//!     println!("{}: {}", response.status, response.payload);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod poller;

mod auth;
mod champions;
mod members;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use poller::{PollBudget, PollOutcome, RegistrationPoller, StatusSource};

use amani_core::extract::Payload;
use reqwest::{Client, StatusCode};

/// HTTP client for the Amani portal API
///
/// Endpoint methods are grouped by concern:
/// - Auth: registration submission, status lookup, login
/// - Members: authenticated profile fetch
/// - Champions: self-signup health probe
#[derive(Debug, Clone)]
pub struct PortalClient {
    /// Base URL of the portal API (e.g., "http://127.0.0.1:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl PortalClient {
    /// Create a new portal client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the portal API
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new portal client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the portal API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read a response into an [`ApiResponse`]
    ///
    /// The portal may answer with any status code and any body shape
    /// (JSON, plain text, or an HTML error page); all of those are data.
    /// Only a transport failure while reading the body is an error.
    pub(crate) async fn read_response(&self, response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let text = response.text().await?;

        Ok(ApiResponse {
            status,
            content_type,
            payload: Payload::parse(&text),
        })
    }
}

/// Response from any portal endpoint: status line plus JSON-or-raw body
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header, when the backend sent one
    pub content_type: Option<String>,
    /// Body, parsed as JSON when possible
    pub payload: Payload,
}

impl ApiResponse {
    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Whether the backend answered with an HTML page instead of JSON
    ///
    /// Deployments fronted by a static host serve HTML error pages for
    /// unknown API paths; callers use this to trigger fallback routes.
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|value| value.contains("text/html"))
    }
}
