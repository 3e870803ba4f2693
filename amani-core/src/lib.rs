//! Amani Core
//!
//! Core types for the Amani portal smoke tooling.
//!
//! This crate contains:
//! - Domain types: registration status taxonomy, poll state, credentials
//! - DTOs: request payloads for the portal API
//! - Extraction: priority-ordered field lookups over loose response bodies

pub mod domain;
pub mod dto;
pub mod extract;
