use chrono::NaiveDateTime;
use thiserror::Error;

/// Failures that stop a trip from being planned.
///
/// None of these are raised out of [`TripPlanner::plan`](crate::TripPlanner::plan); they are
/// rendered into [`SimulationResult::error`](crate::SimulationResult) instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    #[error("cycle hours must be a finite, non-negative number (got {0})")]
    InvalidCycleHours(f64),

    #[error("unrecognised start instant {0:?}")]
    InvalidStartInstant(String),

    #[error("event ends before it starts ({start} > {end})")]
    ReversedInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),
}
