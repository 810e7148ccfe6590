// tests/support/mocks/time.rs
use articles_api::application::ports::time::Clock;
use chrono::{DateTime, TimeZone, Utc};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

#[derive(Clone, Default)]
pub struct DummyClock;

impl Clock for DummyClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}
