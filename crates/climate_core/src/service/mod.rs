//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into route-level APIs.
//! - Keep the HTTP layer decoupled from storage details.

pub mod climate_service;
