//! Time source for archive stamps.

use chrono::{Local, NaiveDateTime};

/// Format of the second-granularity stamp in archive names.
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// `YYYYMMDD_HHMMSS` for [`Clock::now`].
    fn stamp(&self) -> String {
        self.now().format(STAMP_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    struct Fixed(NaiveDateTime);

    impl Clock for Fixed {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    #[test]
    fn stamp_has_second_granularity() {
        let at = NaiveDate::from_ymd_opt(2025, 11, 15)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .expect("valid date");
        assert_eq!(Fixed(at).stamp(), "20251115_030405");
    }

    #[test]
    fn system_clock_stamp_is_fifteen_chars() {
        assert_eq!(SystemClock.stamp().len(), 15);
    }
}
