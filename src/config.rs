//! Regulatory limits and log metadata.
//!
//! Every field has a default, so a JSON file only needs the values it overrides:
//!
//! ```json
//! { "limits": { "avg_speed_mph": 55.0 }, "truck_number": "TRK-7" }
//! ```

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{error::PlanError, simulation::MIN_DRIVE_SEGMENT};

/// Hours-of-service limits and fixed activity durations. Hours unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HosLimits {
    pub avg_speed_mph: f64,
    /// Driving allowed before a short break is mandatory.
    pub max_drive_continuous: f64,
    /// Driving allowed between two full resets.
    pub max_drive_daily: f64,
    /// Span after the first on-duty event within which all driving must happen.
    pub duty_window: f64,
    /// Length of the sleeper-berth reset.
    pub daily_reset: f64,
    pub fuel_interval_miles: f64,
    pub break_duration: f64,
    /// Shortest off-duty period that clears the continuous-drive counter.
    pub min_qualifying_break: f64,
    pub fuel_stop_duration: f64,
    pub inspection_duration: f64,
    pub load_unload_duration: f64,
}

impl Default for HosLimits {
    fn default() -> Self {
        Self {
            avg_speed_mph: 60.0,
            max_drive_continuous: 8.0,
            max_drive_daily: 11.0,
            duty_window: 14.0,
            daily_reset: 10.0,
            fuel_interval_miles: 1000.0,
            break_duration: 0.5,
            min_qualifying_break: 0.5,
            fuel_stop_duration: 0.25,
            inspection_duration: 0.25,
            load_unload_duration: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub limits: HosLimits,
    pub carrier: String,
    pub truck_number: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            limits: HosLimits::default(),
            carrier: "Spotter Logistics Inc.".to_string(),
            truck_number: "TRK-1042".to_string(),
        }
    }
}

impl PlannerConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("unable to open config {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("unable to parse config {}", path.display()))
    }

    /// Rejects limits that would make the drive loop unable to progress.
    pub fn validate(&self) -> Result<(), PlanError> {
        let l = &self.limits;
        let positive = [
            ("avg_speed_mph", l.avg_speed_mph),
            ("max_drive_continuous", l.max_drive_continuous),
            ("max_drive_daily", l.max_drive_daily),
            ("duty_window", l.duty_window),
            ("daily_reset", l.daily_reset),
            ("fuel_interval_miles", l.fuel_interval_miles),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlanError::InvalidConfig(format!(
                    "{name} must be positive and finite (got {value})"
                )));
            }
        }

        let non_negative = [
            ("break_duration", l.break_duration),
            ("min_qualifying_break", l.min_qualifying_break),
            ("fuel_stop_duration", l.fuel_stop_duration),
            ("inspection_duration", l.inspection_duration),
            ("load_unload_duration", l.load_unload_duration),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::InvalidConfig(format!(
                    "{name} must be non-negative and finite (got {value})"
                )));
            }
        }

        let bounded_drives = [
            ("max_drive_continuous", l.max_drive_continuous),
            ("max_drive_daily", l.max_drive_daily),
            ("duty_window", l.duty_window),
            (
                "fuel_interval_miles / avg_speed_mph",
                l.fuel_interval_miles / l.avg_speed_mph,
            ),
        ];
        for (name, hours) in bounded_drives {
            if hours <= MIN_DRIVE_SEGMENT {
                return Err(PlanError::InvalidConfig(format!(
                    "{name} leaves no drivable time ({hours} h)"
                )));
            }
        }
        Ok(())
    }
}
