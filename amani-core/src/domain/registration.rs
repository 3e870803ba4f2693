//! Registration domain types
//!
//! A membership application moves through a small closed set of statuses.
//! The backend reports them as free-form labels; everything here works on
//! the normalized form.

use serde::{Deserialize, Serialize};

use crate::extract::{self, Payload};

/// Membership application status as reported by the portal backend
///
/// `classify` normalizes the wire label into this closed set; any label
/// outside it maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Active,
    Rejected,
    Unknown,
}

impl RegistrationStatus {
    /// Normalizes a wire label (any casing) into the closed status set
    pub fn classify(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "active" => Self::Active,
            "rejected" => Self::Rejected,
            _ => Self::Unknown,
        }
    }

    /// Terminal statuses are final; once observed no further polls occur
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Active | Self::Rejected)
    }

    /// Whether the member account is expected to accept a login
    pub fn grants_login(self) -> bool {
        matches!(self, Self::Approved | Self::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Active => "Active",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last observed state of a status poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    /// Classified status from the most recent readable response
    pub status: RegistrationStatus,
    /// HTTP status code of that response, if any response was received
    pub http_status: Option<u16>,
}

impl Default for PollState {
    fn default() -> Self {
        Self {
            status: RegistrationStatus::Unknown,
            http_status: None,
        }
    }
}

/// A successfully submitted registration: the backend-assigned identifier
/// plus the payload it was extracted from
#[derive(Debug, Clone)]
pub struct RegistrationResult {
    pub registration_id: String,
    pub body: Payload,
}

impl RegistrationResult {
    /// Extracts the registration identifier from a response payload
    ///
    /// Returns `None` when no recognizable identifier field is present,
    /// in which case polling must not start.
    pub fn from_payload(payload: &Payload) -> Option<Self> {
        extract::registration_id(payload).map(|registration_id| Self {
            registration_id,
            body: payload.clone(),
        })
    }
}
