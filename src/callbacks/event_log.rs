use tracing::info;

use crate::{
    model::{DutyEvent, SimulationResult, Stop},
    simulation::callback::SimulationCallback,
};

/// Traces the timeline as it is built, one line per event or stop.
#[derive(Debug, Clone, Default)]
pub struct EventLogCallback;

impl SimulationCallback for EventLogCallback {
    fn visit_event(&mut self, event: &DutyEvent) {
        info!(
            status = event.status.code(),
            start = %event.start_time,
            end = %event.end_time,
            hours = event.duration,
            location = %event.location,
            "{}",
            event.remarks
        );
    }

    fn visit_stop(&mut self, stop: &Stop) {
        info!(
            kind = ?stop.kind,
            lat = stop.location.coords.lat,
            lng = stop.location.coords.lng,
            "stop at {}",
            stop.location.name
        );
    }

    fn visit_finished(&mut self, result: &SimulationResult) {
        for day in &result.logs {
            info!(
                date = %day.date,
                miles = day.total_miles,
                driving = day.total_hours.driving,
                on_duty = day.total_hours.on_duty,
                cycle_used = day.cycle_used_end,
                "daily log"
            );
        }
    }
}
