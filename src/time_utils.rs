// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, Datelike, Utc};

/// Source of the current time, injectable so renders can be pinned in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar year of `now()`, evaluated on every call.
    fn current_year(&self) -> i32 {
        self.now().year()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Noon UTC on January 1st of `year`.
    pub fn new_year(year: i32) -> Self {
        let date = chrono::NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or_default();
        Self(date)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Milliseconds since the Unix epoch for `date`, clamped at zero.
pub fn unix_millis(date: DateTime<Utc>) -> u64 {
    u64::try_from(date.timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_year() {
        assert_eq!(FixedClock::new_year(2024).current_year(), 2024);
        assert_eq!(FixedClock::new_year(2031).current_year(), 2031);
    }

    #[test]
    fn test_unix_millis() {
        let clock = FixedClock::new_year(1970);
        assert_eq!(unix_millis(clock.now()), 12 * 60 * 60 * 1000);
    }
}
