//! Injected wall-clock capability.
//!
//! The cutoff rule depends on "today" and the current time of day. Reading
//! those from a global inside the policy would make the 08:00 boundary
//! untestable, so the clock is passed in explicitly: the CLI hands over a
//! [`SystemClock`] (or a [`FixedClock`] when `--now` is given) and tests pin
//! whatever instant they need.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

pub trait Clock {
    fn today(&self) -> NaiveDate;
    fn time_of_day(&self) -> NaiveTime;
}

/// The real local wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A pinned instant, for tests and the hidden `--now` override.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        FixedClock { now }
    }

    /// Parse "YYYY-MM-DD HH:MM[:SS]" (a 'T' separator is accepted too).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        for fmt in [
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M",
        ] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(FixedClock::new(dt));
            }
        }
        None
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.now.date()
    }

    fn time_of_day(&self) -> NaiveTime {
        self.now.time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_parses_common_formats() {
        for s in [
            "2024-06-10 07:59:59",
            "2024-06-10 07:59",
            "2024-06-10T07:59:59",
        ] {
            let c = FixedClock::parse(s).unwrap();
            assert_eq!(c.today(), "2024-06-10".parse().unwrap());
        }
        assert!(FixedClock::parse("10/06/2024 08:00").is_none());
    }
}
