//! Typed records for the climate dataset and the shapes served from it.
//!
//! # Responsibility
//! - Mirror the `measurement` and `station` rows as concrete structures.
//! - Define the JSON projections returned by the API routes.
//!
//! # Invariants
//! - Records are read-only snapshots; nothing here is written back.

pub mod observation;
