//! Hours-of-service trip planning.
//!
//! [`TripPlanner`] forward-simulates a pickup-and-delivery trip under driving limits
//! (continuous driving, daily driving, duty window, fuel range), inserts the breaks, resets
//! and fuel stops those limits force, and slices the resulting timeline into one
//! [`DailyLog`] per calendar day.
//!
//! ```
//! use hos_planner::{CityTable, PlannerConfig, TripPlanner, TripRequest};
//!
//! let planner = TripPlanner::new(CityTable::builtin(), PlannerConfig::default());
//! let result = planner.plan(&TripRequest {
//!     current_location: "Dallas, TX".to_string(),
//!     pickup_location: "Fort Worth, TX".to_string(),
//!     dropoff_location: "Austin, TX".to_string(),
//!     cycle_used: 12.0,
//!     start_date_time: "2024-01-15T08:00".to_string(),
//! });
//! assert!(result.error.is_none());
//! assert_eq!(result.logs.len(), 1);
//! ```

pub mod callbacks;
pub mod config;
pub mod error;
pub mod geo;
pub mod logs;
pub mod model;
pub mod simulation;
pub mod utils;

pub use config::{HosLimits, PlannerConfig};
pub use error::PlanError;
pub use geo::{CityTable, GeoService, Resolved};
pub use logs::DailyLogSplitter;
pub use model::{
    Coordinates, DailyLog, DutyEvent, DutyStatus, Location, SimulationResult, Stop, StopKind,
    TripRequest, TripSummary,
};
pub use simulation::{
    callback::SimulationCallback,
    event_id::{EventIdGenerator, RandomIds, SequentialIds},
    SimulationState, TripPlanner,
};
