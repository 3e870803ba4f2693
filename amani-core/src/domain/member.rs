//! Member domain types

/// Login credentials for the member portal
///
/// Held in process memory for the duration of a smoke run; never written
/// anywhere.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
