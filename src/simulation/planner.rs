use std::time::Duration;

use chrono::TimeDelta;
use humantime::format_duration;
use tracing::{info, warn};

use crate::{
    config::PlannerConfig,
    error::PlanError,
    geo::GeoService,
    logs::DailyLogSplitter,
    model::{
        DutyEvent, DutyStatus, Location, SimulationResult, StopKind, TripRequest, TripSummary,
    },
    utils::{hours_between, parse_local_instant},
};

use super::{
    callback::SimulationCallback,
    drive_leg::simulate_drive_leg,
    event_id::{EventIdGenerator, SequentialIds},
    state::{SimulationState, StopTally},
};

/// Calendar room a trip needs after its start instant.
const PLANNING_HORIZON_DAYS: i64 = 366;

/// Plans whole trips: inspection, drive to pickup, load, drive to dropoff, unload,
/// inspection.
///
/// The planner holds no per-trip state. Every call to [`plan`](Self::plan) starts from a
/// fresh clone of the id generator and callbacks, so the same request always yields the
/// same result.
pub struct TripPlanner<G> {
    geo: G,
    config: PlannerConfig,
    ids: Box<dyn EventIdGenerator>,
    callbacks: Vec<Box<dyn SimulationCallback>>,
}

impl<G: GeoService> TripPlanner<G> {
    pub fn new(geo: G, config: PlannerConfig) -> Self {
        Self {
            geo,
            config,
            ids: Box::new(SequentialIds::default()),
            callbacks: Vec::new(),
        }
    }

    pub fn with_id_generator(mut self, ids: Box<dyn EventIdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_callback(mut self, callback: Box<dyn SimulationCallback>) -> Self {
        self.callbacks.push(callback);
        self
    }

    /// Plans a trip. Failures are reported through [`SimulationResult::error`].
    pub fn plan(&self, request: &TripRequest) -> SimulationResult {
        self.try_plan(request).unwrap_or_else(|err| {
            warn!(%err, "trip planning failed");
            SimulationResult::failed(&err)
        })
    }

    pub fn try_plan(&self, request: &TripRequest) -> Result<SimulationResult, PlanError> {
        self.config.validate()?;
        let cycle_used_at_start = request.validate_cycle_used()?;
        let start = parse_local_instant(&request.start_date_time)?;
        if start
            .checked_add_signed(TimeDelta::days(PLANNING_HORIZON_DAYS))
            .is_none()
        {
            return Err(PlanError::InvalidStartInstant(
                request.start_date_time.clone(),
            ));
        }
        let limits = self.config.limits;

        let mut warnings = Vec::new();
        let origin = self.locate(&request.current_location, &mut warnings);
        let pickup = self.locate(&request.pickup_location, &mut warnings);
        let dropoff = self.locate(&request.dropoff_location, &mut warnings);

        let mut state = SimulationState::new(start, &origin, cycle_used_at_start, limits)
            .with_id_generator(self.ids.clone())
            .with_callbacks(self.callbacks.clone());
        state.push_stop(origin.clone(), StopKind::Start);

        state.record(
            DutyStatus::OnDuty,
            limits.inspection_duration,
            origin.name.as_str(),
            "Pre-trip Inspection",
            None,
        );

        simulate_drive_leg(&mut state, &self.geo, &pickup);
        state.record(
            DutyStatus::OnDuty,
            limits.load_unload_duration,
            pickup.name.as_str(),
            "Loading Cargo",
            None,
        );
        state.push_stop(pickup, StopKind::Pickup);

        simulate_drive_leg(&mut state, &self.geo, &dropoff);
        state.record(
            DutyStatus::OnDuty,
            limits.load_unload_duration,
            dropoff.name.as_str(),
            "Unloading Cargo",
            None,
        );
        state.push_stop(dropoff.clone(), StopKind::Dropoff);

        state.record(
            DutyStatus::OnDuty,
            limits.inspection_duration,
            dropoff.name.as_str(),
            "Post-trip Inspection",
            None,
        );
        state.record(
            DutyStatus::OffDuty,
            0.0,
            dropoff.name.as_str(),
            "End of Trip",
            None,
        );

        let events = std::mem::take(&mut state.events);
        let logs = DailyLogSplitter::from(&self.config).split(&events, cycle_used_at_start)?;
        let summary = summarize(&events, state.tally, state.cycle_used);
        let elapsed = Duration::from_secs((summary.elapsed_hours * 3600.0).round() as u64);
        info!(
            miles = summary.total_miles,
            driving_hours = summary.driving_hours,
            elapsed = %format_duration(elapsed),
            resets = summary.daily_resets,
            fuel_stops = summary.fuel_stops,
            days = logs.len(),
            "trip planned"
        );

        let result = SimulationResult {
            logs,
            route_path: std::mem::take(&mut state.route_path),
            stops: std::mem::take(&mut state.stops),
            events,
            summary,
            warnings,
            error: None,
        };
        state.notify_finished(&result);
        Ok(result)
    }

    fn locate(&self, name: &str, warnings: &mut Vec<String>) -> Location {
        let resolved = self.geo.resolve(name);
        if resolved.is_fallback() {
            let coords = resolved.coords();
            warn!(
                name,
                lat = coords.lat,
                lng = coords.lng,
                "unknown location, using default coordinates"
            );
            warnings.push(format!(
                "location {name:?} not found, using default coordinates ({}, {})",
                coords.lat, coords.lng
            ));
        }
        Location::new(name, resolved.coords())
    }
}

fn summarize(events: &[DutyEvent], tally: StopTally, cycle_used_end: f64) -> TripSummary {
    let hours_in = |status: DutyStatus| -> f64 {
        events
            .iter()
            .filter(|e| e.status == status)
            .map(|e| e.duration)
            .sum()
    };
    let elapsed_hours = match (events.first(), events.last()) {
        (Some(first), Some(last)) => hours_between(first.start_time, last.end_time),
        _ => 0.0,
    };

    TripSummary {
        total_miles: events.iter().filter_map(|e| e.distance).sum(),
        driving_hours: hours_in(DutyStatus::Driving),
        on_duty_hours: hours_in(DutyStatus::OnDuty),
        elapsed_hours,
        short_breaks: tally.short_breaks,
        daily_resets: tally.daily_resets,
        fuel_stops: tally.fuel_stops,
        cycle_used_end,
    }
}
