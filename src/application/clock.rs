// Wall-clock display
use chrono::{NaiveDate, NaiveDateTime};

/// Formatted time and date for the clock region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockText {
    pub time: String,
    pub date: String,
}

/// Ticks once a second, but only renders after it has been started.
#[derive(Debug, Default)]
pub struct Clock {
    running: bool,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true the first time only.
    pub fn start(&mut self) -> bool {
        let first = !self.running;
        self.running = true;
        first
    }

    pub fn format(now: &NaiveDateTime) -> ClockText {
        ClockText {
            time: now.format("%H:%M").to_string(),
            date: now.format("%A, %B %-d").to_string(),
        }
    }

    /// Shown before the first connected status: midnight, 1 January 2000
    pub fn placeholder() -> ClockText {
        let epoch = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        Self::format(&epoch)
    }
}
