pub mod callback;
pub mod drive_leg;
pub mod event_id;
pub mod planner;
pub mod rest;
pub mod state;

/// Below this many hours of allowed driving the truck cannot move without a reset.
pub const MIN_DRIVE_SEGMENT: f64 = 0.01;

/// Two allowances closer than this are treated as the same constraint binding.
pub const BINDING_TOLERANCE: f64 = 0.001;

pub use drive_leg::{simulate_drive_leg, Allowances, Constraint, LegOutcome};
pub use planner::TripPlanner;
pub use state::SimulationState;
