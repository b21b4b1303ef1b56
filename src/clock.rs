use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::sync::{Arc, Mutex};

/// Source of "now" for everything date-sensitive in the crate.
///
/// The disabled-date policy compares candidates against today, so the
/// current date has to be injectable or none of that logic is testable.
pub trait Clock: Send + Sync {
    fn now_dt(&self) -> NaiveDateTime;

    fn now_date(&self) -> NaiveDate {
        self.now_dt().date()
    }
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_dt(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_date(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock for deterministic tests.
#[derive(Clone)]
pub struct TestClock {
    current_time: Arc<Mutex<NaiveDateTime>>,
}

impl TestClock {
    pub fn new(datetime_str: &str) -> Self {
        let dt = NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S")
            .expect("Failed to parse datetime string in TestClock::new");
        Self {
            current_time: Arc::new(Mutex::new(dt)),
        }
    }

    pub fn set_time(&self, datetime_str: &str) {
        *self.current_time.lock().unwrap() =
            NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S")
                .expect("Failed to parse datetime string in TestClock::set_time");
    }

    pub fn advance(&self, duration: Duration) {
        *self.current_time.lock().unwrap() += duration;
    }
}

impl Clock for TestClock {
    fn now_dt(&self) -> NaiveDateTime {
        *self.current_time.lock().unwrap()
    }

    fn now_date(&self) -> NaiveDate {
        self.current_time.lock().unwrap().date()
    }
}
