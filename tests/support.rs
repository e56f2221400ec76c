//! Shared checks for planned trips.

#![allow(dead_code)]

use std::collections::HashMap;

use hos_planner::{DutyStatus, HosLimits, SimulationResult};

pub const TOLERANCE: f64 = 1e-6;

pub fn request(
    current: &str,
    pickup: &str,
    dropoff: &str,
    cycle_used: f64,
    start: &str,
) -> hos_planner::TripRequest {
    hos_planner::TripRequest {
        current_location: current.to_string(),
        pickup_location: pickup.to_string(),
        dropoff_location: dropoff.to_string(),
        cycle_used,
        start_date_time: start.to_string(),
    }
}

pub fn assert_contiguous(result: &SimulationResult) {
    for pair in result.events.windows(2) {
        assert_eq!(
            pair[0].end_time, pair[1].start_time,
            "gap or overlap between {:?} and {:?}",
            pair[0].id, pair[1].id
        );
    }
}

/// Walks the timeline checking the continuous, daily and window limits on every drive.
pub fn assert_within_limits(result: &SimulationResult, limits: &HosLimits) {
    let mut continuous = 0.0;
    let mut daily = 0.0;
    let mut window_start = None;

    for event in &result.events {
        match event.status {
            DutyStatus::SleeperBerth if event.duration >= limits.daily_reset => {
                continuous = 0.0;
                daily = 0.0;
                window_start = None;
            }
            DutyStatus::OffDuty | DutyStatus::SleeperBerth
                if event.duration >= limits.min_qualifying_break =>
            {
                continuous = 0.0;
            }
            DutyStatus::Driving | DutyStatus::OnDuty => {
                let opened = *window_start.get_or_insert(event.start_time);
                if event.status == DutyStatus::Driving {
                    continuous += event.duration;
                    daily += event.duration;
                    let into_window = hos_planner::utils::hours_between(opened, event.end_time);
                    assert!(
                        into_window <= limits.duty_window + TOLERANCE,
                        "drive {:?} ends {into_window}h into the window",
                        event.id
                    );
                }
            }
            _ => {}
        }
        assert!(
            continuous <= limits.max_drive_continuous + TOLERANCE,
            "continuous driving reached {continuous}h at {:?}",
            event.id
        );
        assert!(
            daily <= limits.max_drive_daily + TOLERANCE,
            "daily driving reached {daily}h at {:?}",
            event.id
        );
    }
}

/// Within a leg, no more than the fuel interval is driven between fuel stops.
pub fn assert_fuel_cadence(result: &SimulationResult, limits: &HosLimits) {
    let mut since_fuel = 0.0;
    for event in &result.events {
        match event.remarks.as_str() {
            "Refueling" | "Loading Cargo" => since_fuel = 0.0,
            _ => since_fuel += event.distance.unwrap_or(0.0),
        }
        assert!(
            since_fuel <= limits.fuel_interval_miles + TOLERANCE,
            "{since_fuel} miles without fuel at {:?}",
            event.id
        );
    }
}

/// Every non-empty event is fully accounted for by its chunks across the daily logs.
pub fn assert_chunks_conserve_events(result: &SimulationResult) {
    let mut chunked: HashMap<&str, f64> = HashMap::new();
    for day in &result.logs {
        for chunk in &day.events {
            *chunked.entry(chunk.id.0.as_str()).or_default() += chunk.duration;
        }
    }
    for event in &result.events {
        let total = chunked.get(event.id.0.as_str()).copied().unwrap_or(0.0);
        assert!(
            (total - event.duration).abs() < TOLERANCE,
            "event {:?} lasted {}h but its chunks sum to {total}h",
            event.id,
            event.duration
        );
    }
}

pub fn assert_cycle_accumulates(result: &SimulationResult, cycle_used_at_start: f64) {
    let on_duty: f64 = result
        .events
        .iter()
        .filter(|e| e.status.is_on_duty())
        .map(|e| e.duration)
        .sum();
    let expected = cycle_used_at_start + on_duty;
    assert!((result.summary.cycle_used_end - expected).abs() < TOLERANCE);

    let last_day = result.logs.last().expect("at least one daily log");
    assert!((last_day.cycle_used_end - expected).abs() < TOLERANCE);
    for pair in result.logs.windows(2) {
        assert!((pair[0].cycle_used_end - pair[1].cycle_used_start).abs() < TOLERANCE);
        assert!(pair[0].cycle_used_start <= pair[0].cycle_used_end);
    }
}

pub fn assert_days_are_consecutive(result: &SimulationResult) {
    for pair in result.logs.windows(2) {
        assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
    }
    let miles: f64 = result.logs.iter().map(|d| d.total_miles).sum();
    assert!((miles - result.summary.total_miles).abs() < TOLERANCE);
}

pub fn assert_all_invariants(result: &SimulationResult, limits: &HosLimits, cycle_used: f64) {
    assert!(result.error.is_none(), "unexpected error {:?}", result.error);
    assert_contiguous(result);
    assert_within_limits(result, limits);
    assert_fuel_cadence(result, limits);
    assert_chunks_conserve_events(result);
    assert_cycle_accumulates(result, cycle_used);
    assert_days_are_consecutive(result);
}
