//! Repository layer over the per-user document store.
//!
//! # Responsibility
//! - Define the set/get/list/delete contract the services depend on.
//! - Keep SQL and JSON body encoding inside the persistence boundary.
//!
//! # Invariants
//! - Writes replace whole documents (last-write-wins, no merge).
//! - Reads of a missing document return `None`, not an error.

pub mod document_repo;
