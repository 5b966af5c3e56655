//! Use-case services over the document store.
//!
//! # Responsibility
//! - Map planner, wheel and habit actions to document reads and writes.
//! - Keep CLI callers decoupled from storage and JSON shapes.
//!
//! # Invariants
//! - Every service is bound to one user id for its lifetime.
//! - Failures are logged and returned; nothing is retried.

pub mod habit_service;
pub mod planner_service;
pub mod wheel_service;
