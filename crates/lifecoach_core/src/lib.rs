//! Core domain logic for the lifecoach planner, wheel of life and habit
//! tracker. This crate owns every business invariant; front ends only call
//! into the services.

pub mod analytics;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use analytics::productivity::{CategoryTally, ChartSlice, PlannerSummary};
pub use analytics::wheel_progress::{AreaDelta, ProgressPoint, WheelComparison};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::activity::{Activity, GroupedActivities};
pub use model::category::ValueCategory;
pub use model::habit::Habit;
pub use model::planner::PlannerDocument;
pub use model::schedule::{ScheduleCell, ScheduleData, TimeSlot, Weekday};
pub use model::wheel::{
    clamp_score, date_label, parse_score, today_label, AreaAssessment, LifeArea, WheelEntry,
};
pub use model::ModelError;
pub use repo::document_repo::{
    Collection, DocumentStore, DocumentStoreExt, RepoError, RepoResult, SqliteDocumentStore,
};
pub use service::habit_service::{HabitService, HabitServiceError};
pub use service::planner_service::{PlannerService, PlannerServiceError};
pub use service::wheel_service::{WheelService, WheelServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
