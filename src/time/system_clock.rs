use chrono::{DateTime, Utc};

use crate::time::clock::Clock;

/// A [`Clock`] implementation backed by the system clock.
///
/// Application logic should treat `Clock` as a trusted source; selecting
/// the implementation is the responsibility of the composition root
/// (`main.rs`).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
