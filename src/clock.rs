//! Current-year source and timestamp conversion

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, TimeZone};

/// Supplies the year used when a file has no recorded history
pub trait Clock {
    fn current_year(&self) -> i32;
}

/// Wall clock, local calendar
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Local::now().year()
    }
}

/// Always reports the same year
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

/// Local-calendar year of a Unix timestamp in seconds
pub fn year_of_timestamp(timestamp: i64) -> Result<i32> {
    Local
        .timestamp_opt(timestamp, 0)
        .earliest()
        .map(|time| time.year())
        .ok_or_else(|| anyhow!("Timestamp {} is out of range", timestamp))
}
