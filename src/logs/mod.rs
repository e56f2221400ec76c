//! Slicing of the continuous event timeline into midnight-to-midnight driver logs.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    config::PlannerConfig,
    error::PlanError,
    model::{DailyLog, DutyEvent},
    utils::next_midnight,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyLogSplitter {
    pub carrier: String,
    pub truck_number: String,
}

impl From<&PlannerConfig> for DailyLogSplitter {
    fn from(config: &PlannerConfig) -> Self {
        Self {
            carrier: config.carrier.clone(),
            truck_number: config.truck_number.clone(),
        }
    }
}

impl DailyLogSplitter {
    /// Cuts every event at each midnight it crosses and groups the chunks by date.
    ///
    /// Chunk durations come from the clipped bounds. Driving distance is prorated by the
    /// chunk's share of its event. Driving and on-duty chunks advance the running cycle
    /// total, which each day snapshots at its first and last chunk. Zero-length events
    /// produce no chunk. Days come back in date order.
    pub fn split(
        &self,
        events: &[DutyEvent],
        cycle_used_at_start: f64,
    ) -> Result<Vec<DailyLog>, PlanError> {
        let mut days: BTreeMap<NaiveDate, DailyLog> = BTreeMap::new();
        let mut cycle_used = cycle_used_at_start;

        for event in events {
            if event.end_time < event.start_time {
                return Err(PlanError::ReversedInterval {
                    start: event.start_time,
                    end: event.end_time,
                });
            }
            let full_hours = event.span_hours();

            let mut chunk_start = event.start_time;
            while chunk_start < event.end_time {
                let chunk_end = event.end_time.min(next_midnight(chunk_start));
                let chunk = event.clipped(chunk_start, chunk_end);
                let date = chunk_start.date();
                let day = days.entry(date).or_insert_with(|| {
                    DailyLog::new(date, cycle_used, &self.carrier, &self.truck_number)
                });

                day.total_hours.add(chunk.status, chunk.duration);
                if let Some(miles) = event.distance {
                    if full_hours > 0.0 {
                        day.total_miles += miles * chunk.duration / full_hours;
                    }
                }
                if chunk.status.is_on_duty() {
                    cycle_used += chunk.duration;
                }
                day.cycle_used_end = cycle_used;
                day.events.push(chunk);

                chunk_start = chunk_end;
            }
        }

        Ok(days.into_values().collect())
    }
}
