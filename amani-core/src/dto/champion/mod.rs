//! Champion request payloads

use serde::{Deserialize, Serialize};

/// Body of `POST /api/champions/register`
///
/// The champions route predates the snake_case convention, hence the
/// camelCase name field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionSignup {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub dob: String,
    pub gender: String,
    pub phone: String,
    pub consent_obtained: bool,
}
