use chrono::NaiveDateTime;
use derivative::Derivative;
use tracing::debug;

use crate::{
    config::HosLimits,
    model::{Coordinates, DutyEvent, DutyStatus, Location, SimulationResult, Stop, StopKind},
    utils::{hours_between, hours_to_delta},
};

use super::{
    callback::SimulationCallback,
    event_id::{EventIdGenerator, SequentialIds},
};

/// How many of each interruption the run has inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopTally {
    pub short_breaks: usize,
    pub daily_resets: usize,
    pub fuel_stops: usize,
}

/// Everything one trip simulation mutates.
///
/// Each run owns its state; transitions are the methods here and in `rest.rs`, and each can
/// be exercised on its own.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct SimulationState {
    pub now: NaiveDateTime,
    pub position: Coordinates,
    pub position_name: String,
    pub status: DutyStatus,

    /// Driving since the last qualifying break or reset.
    pub drive_continuous: f64,
    /// Driving since the last reset.
    pub drive_daily: f64,
    /// Driving plus on-duty time since the last reset.
    pub on_duty_daily: f64,
    /// Start of the current duty window; `None` until the first on-duty event after a reset.
    pub window_start: Option<NaiveDateTime>,
    pub cycle_used: f64,

    pub events: Vec<DutyEvent>,
    pub route_path: Vec<Coordinates>,
    pub stops: Vec<Stop>,
    pub tally: StopTally,

    pub limits: HosLimits,

    #[derivative(Debug = "ignore")]
    ids: Box<dyn EventIdGenerator>,
    #[derivative(Debug = "ignore")]
    callbacks: Vec<Box<dyn SimulationCallback>>,
}

impl SimulationState {
    pub fn new(start: NaiveDateTime, origin: &Location, cycle_used: f64, limits: HosLimits) -> Self {
        Self {
            now: start,
            position: origin.coords,
            position_name: origin.name.clone(),
            status: DutyStatus::OffDuty,
            drive_continuous: 0.0,
            drive_daily: 0.0,
            on_duty_daily: 0.0,
            window_start: None,
            cycle_used,
            events: Vec::new(),
            route_path: vec![origin.coords],
            stops: Vec::new(),
            tally: StopTally::default(),
            limits,
            ids: Box::new(SequentialIds::default()),
            callbacks: Vec::new(),
        }
    }

    pub fn with_id_generator(mut self, ids: Box<dyn EventIdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_callbacks(mut self, callbacks: Vec<Box<dyn SimulationCallback>>) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Appends an event starting now and moves the clock to its end.
    ///
    /// Driving and on-duty events open the duty window if it is closed and count towards the
    /// daily on-duty total and the cycle. Off-duty and sleeper events touch neither.
    pub fn record(
        &mut self,
        status: DutyStatus,
        hours: f64,
        location: impl Into<String>,
        remarks: impl Into<String>,
        distance: Option<f64>,
    ) {
        let start = self.now;
        let end = start + hours_to_delta(hours);
        let event = DutyEvent {
            id: self.ids.next_id(),
            status,
            start_time: start,
            end_time: end,
            duration: hours,
            location: location.into(),
            remarks: remarks.into(),
            distance,
        };
        debug!(
            id = %event.id,
            status = status.code(),
            %start,
            hours,
            remarks = %event.remarks,
            "recorded event"
        );

        self.now = end;
        self.status = status;
        if status.is_on_duty() {
            self.window_start.get_or_insert(start);
            self.on_duty_daily += hours;
            self.cycle_used += hours;
        }

        self.callbacks
            .iter_mut()
            .for_each(|cb| cb.visit_event(&event));
        self.events.push(event);
    }

    pub fn push_stop(&mut self, location: Location, kind: StopKind) {
        let stop = Stop { location, kind };
        self.callbacks.iter_mut().for_each(|cb| cb.visit_stop(&stop));
        self.stops.push(stop);
    }

    /// Adds a waypoint at the truck's current position.
    pub fn push_stop_here(&mut self, name: &str, kind: StopKind) {
        self.push_stop(Location::new(name, self.position), kind);
    }

    pub fn continuous_remaining(&self) -> f64 {
        self.limits.max_drive_continuous - self.drive_continuous
    }

    pub fn daily_remaining(&self) -> f64 {
        self.limits.max_drive_daily - self.drive_daily
    }

    /// Hours left in the duty window; a closed window is fully available.
    pub fn window_remaining(&self) -> f64 {
        match self.window_start {
            None => self.limits.duty_window,
            Some(start) => (self.limits.duty_window - hours_between(start, self.now)).max(0.0),
        }
    }

    pub fn notify_finished(&mut self, result: &SimulationResult) {
        self.callbacks
            .iter_mut()
            .for_each(|cb| cb.visit_finished(result));
    }
}
