//! Derived metrics recomputed from documents on every read.

pub mod productivity;
pub mod wheel_progress;
