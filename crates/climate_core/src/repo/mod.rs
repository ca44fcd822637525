//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define read-only data access contracts over the climate dataset.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs never mutate the dataset.
//! - Repository APIs return semantic errors (`InvalidData`) in addition to
//!   DB transport errors.

pub mod climate_repo;
