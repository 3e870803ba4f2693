//! Request payloads for the portal API

pub mod auth;
pub mod champion;
