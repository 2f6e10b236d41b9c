//! Aggregate usage statistics.
//!
//! Fetches the two usage series (resolutions per day, resolutions per
//! device type) and massages them into display-ready form: running
//! cumulative totals and an overall average for the time series, stable
//! display indices for the device series. Failures follow the summary
//! policy: log and keep the previous data.

use crate::services::{DeviceUsage, UsageSample, UsageService};
use chrono::NaiveDate;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Default group level for the per-day series (year/month/day).
pub const DEFAULT_TIME_GROUP_LEVEL: u32 = 3;

/// Default group level for the per-device series.
pub const DEFAULT_DEVICE_GROUP_LEVEL: u32 = 1;

/// One day of usage with its running cumulative total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageTimePoint {
    pub date: NaiveDate,
    pub value: u64,
    pub running_total: u64,
}

/// The per-day usage series, display-ready.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageByTime {
    pub points: Vec<UsageTimePoint>,
    pub total: u64,
    pub average: f64,
}

/// One device-type row with its stable display index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceUsageRow {
    pub index: usize,
    pub device: String,
    pub value: u64,
}

/// Fold daily samples into cumulative form.
///
/// The average divides by one for an empty series so it never produces a
/// NaN for an unused deployment.
pub fn accumulate(samples: Vec<UsageSample>) -> UsageByTime {
    let mut running_total = 0;
    let points: Vec<UsageTimePoint> = samples
        .into_iter()
        .map(|sample| {
            running_total += sample.value;
            UsageTimePoint {
                date: sample.date,
                value: sample.value,
                running_total,
            }
        })
        .collect();

    let average = running_total as f64 / points.len().max(1) as f64;
    UsageByTime {
        points,
        total: running_total,
        average,
    }
}

/// Assign stable display indices to the device rows.
pub fn index_devices(rows: Vec<DeviceUsage>) -> Vec<DeviceUsageRow> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| DeviceUsageRow {
            index,
            device: row.device,
            value: row.value,
        })
        .collect()
}

#[derive(Debug, Default)]
struct UsageState {
    by_time: UsageByTime,
    by_device: Vec<DeviceUsageRow>,
}

/// Keeps the usage series up to date.
#[derive(Clone)]
pub struct UsageRefresher {
    service: Arc<dyn UsageService>,
    state: Arc<Mutex<UsageState>>,
}

impl UsageRefresher {
    pub fn new(service: Arc<dyn UsageService>) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(UsageState::default())),
        }
    }

    /// Refresh the per-day series.
    pub async fn refresh_by_time(&self, group_level: u32) {
        match self.service.usage_by_time(group_level).await {
            Ok(samples) => {
                let series = accumulate(samples);
                debug!(points = series.points.len(), total = series.total, "usage-by-time refreshed");
                self.state.lock().unwrap().by_time = series;
            }
            Err(error) => debug!(%error, "usage-by-time refresh failed"),
        }
    }

    /// Refresh the per-device series.
    pub async fn refresh_by_device(&self, group_level: u32) {
        match self.service.usage_by_device(group_level).await {
            Ok(rows) => {
                let rows = index_devices(rows);
                debug!(rows = rows.len(), "usage-by-device refreshed");
                self.state.lock().unwrap().by_device = rows;
            }
            Err(error) => debug!(%error, "usage-by-device refresh failed"),
        }
    }

    /// Current per-day series.
    pub fn by_time(&self) -> UsageByTime {
        self.state.lock().unwrap().by_time.clone()
    }

    /// Current per-device rows.
    pub fn by_device(&self) -> Vec<DeviceUsageRow> {
        self.state.lock().unwrap().by_device.clone()
    }
}

impl fmt::Debug for UsageRefresher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsageRefresher").finish_non_exhaustive()
    }
}
