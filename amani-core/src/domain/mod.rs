//! Domain types shared by the client and the smoke commands

pub mod member;
pub mod registration;
