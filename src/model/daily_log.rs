use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DutyEvent, DutyStatus};

/// Hours spent in each duty status, keyed the way a paper log grid labels its rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusHours {
    #[serde(rename = "OFF")]
    pub off_duty: f64,
    #[serde(rename = "SB")]
    pub sleeper_berth: f64,
    #[serde(rename = "D")]
    pub driving: f64,
    #[serde(rename = "ON")]
    pub on_duty: f64,
}

impl StatusHours {
    pub fn get(&self, status: DutyStatus) -> f64 {
        match status {
            DutyStatus::OffDuty => self.off_duty,
            DutyStatus::SleeperBerth => self.sleeper_berth,
            DutyStatus::Driving => self.driving,
            DutyStatus::OnDuty => self.on_duty,
        }
    }

    pub fn add(&mut self, status: DutyStatus, hours: f64) {
        let slot = match status {
            DutyStatus::OffDuty => &mut self.off_duty,
            DutyStatus::SleeperBerth => &mut self.sleeper_berth,
            DutyStatus::Driving => &mut self.driving,
            DutyStatus::OnDuty => &mut self.on_duty,
        };
        *slot += hours;
    }

    pub fn total(&self) -> f64 {
        self.off_duty + self.sleeper_berth + self.driving + self.on_duty
    }
}

/// One calendar day of the driver's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: NaiveDate,
    /// Events clipped to this day, in time order.
    pub events: Vec<DutyEvent>,
    pub total_miles: f64,
    pub total_hours: StatusHours,
    pub cycle_used_start: f64,
    pub cycle_used_end: f64,
    pub carrier: String,
    pub truck_number: String,
}

impl DailyLog {
    pub fn new(date: NaiveDate, cycle_used: f64, carrier: &str, truck_number: &str) -> Self {
        Self {
            date,
            events: Vec::new(),
            total_miles: 0.0,
            total_hours: StatusHours::default(),
            cycle_used_start: cycle_used,
            cycle_used_end: cycle_used,
            carrier: carrier.to_string(),
            truck_number: truck_number.to_string(),
        }
    }
}

#[test]
fn test_status_hours_accumulate() {
    let mut hours = StatusHours::default();
    hours.add(DutyStatus::Driving, 3.0);
    hours.add(DutyStatus::Driving, 1.5);
    hours.add(DutyStatus::SleeperBerth, 10.0);
    assert_eq!(hours.get(DutyStatus::Driving), 4.5);
    assert_eq!(hours.get(DutyStatus::OnDuty), 0.0);
    assert_eq!(hours.total(), 14.5);
}

#[test]
fn test_daily_log_serializes_date_key() {
    let log = DailyLog::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        10.0,
        "Carrier",
        "TRK-1",
    );
    let json = serde_json::to_value(&log).unwrap();
    assert_eq!(json["date"], "2024-03-01");
    assert_eq!(json["totalHours"]["SB"], 0.0);
    assert_eq!(json["cycleUsedStart"], 10.0);
    assert_eq!(json["truckNumber"], "TRK-1");
}
