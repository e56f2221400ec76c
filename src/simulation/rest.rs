use tracing::debug;

use crate::model::{DutyStatus, StopKind};

use super::state::SimulationState;

const REST_AREA: &str = "Rest Area";
const SLEEP_LOCATION: &str = "Truck Stop/Rest Area";
const SLEEP_STOP: &str = "Sleep Stop";
const FUEL_LOCATION: &str = "Highway Truck Stop";
const FUEL_STOP: &str = "Fuel Stop";

pub const MANDATORY_BREAK_REASON: &str = "Mandatory 30m Rest";

impl SimulationState {
    /// Off-duty break at a rest area. Only a break of at least the qualifying length clears
    /// the continuous-drive counter; daily counters are never touched.
    pub fn take_short_break(&mut self, hours: f64, reason: &str) {
        self.record(DutyStatus::OffDuty, hours, REST_AREA, reason, None);
        self.push_stop_here(REST_AREA, StopKind::Rest);
        self.tally.short_breaks += 1;
        if hours >= self.limits.min_qualifying_break {
            self.drive_continuous = 0.0;
        }
    }

    /// Sleeper-berth reset: clears the continuous, daily and window counters.
    pub fn take_daily_reset(&mut self) {
        let hours = self.limits.daily_reset;
        self.record(
            DutyStatus::SleeperBerth,
            hours,
            SLEEP_LOCATION,
            format!("Daily Reset ({hours}h)"),
            None,
        );
        self.push_stop_here(SLEEP_STOP, StopKind::Rest);
        self.tally.daily_resets += 1;

        self.drive_continuous = 0.0;
        self.drive_daily = 0.0;
        self.on_duty_daily = 0.0;
        self.window_start = None;
    }

    /// Recovery when no driving is allowed at all. Always a full reset, whatever limit bound.
    pub fn forced_stop(&mut self) {
        debug!(
            continuous = self.drive_continuous,
            daily = self.drive_daily,
            window_left = self.window_remaining(),
            "cannot drive, forcing a daily reset"
        );
        self.take_daily_reset();
    }

    /// On-duty refuelling at the current position.
    pub fn take_fuel_stop(&mut self) {
        self.record(
            DutyStatus::OnDuty,
            self.limits.fuel_stop_duration,
            FUEL_LOCATION,
            "Refueling",
            None,
        );
        self.push_stop_here(FUEL_STOP, StopKind::Fuel);
        self.tally.fuel_stops += 1;
    }
}
