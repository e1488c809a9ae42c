//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services. Translates
//! JSON requests into domain commands, domain results into the shared DTOs,
//! and domain errors into status codes.

pub mod rest;

pub use rest::*;
