use std::path::Path;

use serde::de::DeserializeOwned;

pub mod city_info;
pub mod daily_log;
pub mod duty;
pub mod trip;

pub use city_info::CityInfo;
pub use daily_log::{DailyLog, StatusHours};
pub use duty::{DutyEvent, DutyStatus, EventId};
pub use trip::{Coordinates, Location, SimulationResult, Stop, StopKind, TripRequest, TripSummary};

fn read_csv<T>(path: impl AsRef<Path>) -> anyhow::Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let mut reader = csv::Reader::from_path(path)?;
    let records: csv::Result<Vec<T>> = reader.deserialize().collect();
    Ok(records?)
}
