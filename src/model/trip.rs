use serde::{Deserialize, Serialize};

use crate::error::PlanError;

use super::{DailyLog, DutyEvent};

/// Latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub coords: Coordinates,
}

impl Location {
    pub fn new(name: impl Into<String>, coords: Coordinates) -> Self {
        Self {
            name: name.into(),
            coords,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Start,
    Pickup,
    Dropoff,
    Rest,
    Fuel,
}

/// A labelled waypoint for the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub location: Location,
    #[serde(rename = "type")]
    pub kind: StopKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Hours already used in the current cycle.
    #[serde(alias = "cycleUsedHours")]
    pub cycle_used: f64,
    /// Local wall-clock start, see [`parse_local_instant`](crate::utils::parse_local_instant).
    #[serde(alias = "startInstant")]
    pub start_date_time: String,
}

impl TripRequest {
    pub fn validate_cycle_used(&self) -> Result<f64, PlanError> {
        if self.cycle_used.is_finite() && self.cycle_used >= 0.0 {
            Ok(self.cycle_used)
        } else {
            Err(PlanError::InvalidCycleHours(self.cycle_used))
        }
    }
}

/// Totals over the whole trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub total_miles: f64,
    pub driving_hours: f64,
    pub on_duty_hours: f64,
    /// Wall-clock hours from the first event's start to the last event's end.
    pub elapsed_hours: f64,
    pub short_breaks: usize,
    pub daily_resets: usize,
    pub fuel_stops: usize,
    pub cycle_used_end: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub logs: Vec<DailyLog>,
    pub route_path: Vec<Coordinates>,
    pub stops: Vec<Stop>,
    /// The unsplit, contiguous event timeline.
    pub events: Vec<DutyEvent>,
    pub summary: TripSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Set when planning failed; everything else is then empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SimulationResult {
    pub fn failed(err: &PlanError) -> Self {
        Self {
            error: Some(err.to_string()),
            ..Default::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[test]
fn test_request_accepts_both_field_spellings() {
    let a: TripRequest = serde_json::from_str(
        r#"{"currentLocation":"A","pickupLocation":"B","dropoffLocation":"C",
            "cycleUsed":10,"startDateTime":"2024-01-15T08:00"}"#,
    )
    .unwrap();
    let b: TripRequest = serde_json::from_str(
        r#"{"currentLocation":"A","pickupLocation":"B","dropoffLocation":"C",
            "cycleUsedHours":10,"startInstant":"2024-01-15T08:00"}"#,
    )
    .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_cycle_used_validation() {
    let mut request = TripRequest {
        current_location: "A".to_string(),
        pickup_location: "B".to_string(),
        dropoff_location: "C".to_string(),
        cycle_used: 0.0,
        start_date_time: "2024-01-15T08:00".to_string(),
    };
    assert_eq!(request.validate_cycle_used(), Ok(0.0));
    request.cycle_used = -1.0;
    assert!(request.validate_cycle_used().is_err());
    request.cycle_used = f64::NAN;
    assert!(request.validate_cycle_used().is_err());
}

#[test]
fn test_failed_result_carries_only_the_error() {
    let result = SimulationResult::failed(&PlanError::InvalidCycleHours(-2.0));
    assert!(!result.is_ok());
    assert!(result.logs.is_empty());
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["error"].as_str().unwrap().contains("-2"));
    assert!(json.get("warnings").is_none());
}

#[test]
fn test_stop_kind_serializes_lowercase() {
    let stop = Stop {
        location: Location::new("Fuel Stop", Coordinates::new(1.0, 2.0)),
        kind: StopKind::Fuel,
    };
    let json = serde_json::to_value(&stop).unwrap();
    assert_eq!(json["type"], "fuel");
    assert_eq!(json["location"]["coords"]["lng"], 2.0);
}
