use std::fmt::{Debug, Display};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::hours_between;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DutyStatus {
    #[serde(rename = "OFF")]
    OffDuty,
    #[serde(rename = "SB")]
    SleeperBerth,
    #[serde(rename = "D")]
    Driving,
    #[serde(rename = "ON")]
    OnDuty,
}

impl DutyStatus {
    /// Driving and on-duty time count against the duty window and the cycle.
    pub fn is_on_duty(&self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDuty)
    }

    pub fn code(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "OFF",
            DutyStatus::SleeperBerth => "SB",
            DutyStatus::Driving => "D",
            DutyStatus::OnDuty => "ON",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::SleeperBerth => "Sleeper Berth",
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDuty => "On Duty",
        }
    }
}

impl Display for DutyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl Debug for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stretch of time spent in one duty status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyEvent {
    pub id: EventId,
    pub status: DutyStatus,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Hours; `end_time - start_time` up to microsecond rounding.
    pub duration: f64,
    pub location: String,
    pub remarks: String,
    /// Miles covered, only present on driving events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl DutyEvent {
    /// Length measured from the event's own bounds.
    pub fn span_hours(&self) -> f64 {
        hours_between(self.start_time, self.end_time)
    }

    /// The part of this event that falls inside `[start, end]`.
    ///
    /// The chunk keeps the parent's id, status, location and remarks; its duration is
    /// recomputed from the clipped bounds. The distance is left as the parent's full
    /// distance, proration is the caller's business.
    pub fn clipped(&self, start: NaiveDateTime, end: NaiveDateTime) -> DutyEvent {
        let start = start.max(self.start_time);
        let end = end.min(self.end_time);
        DutyEvent {
            start_time: start,
            end_time: end,
            duration: hours_between(start, end),
            ..self.clone()
        }
    }
}
