//! Time access behind a small port, so expiry checks stay testable.

pub mod clock;
pub mod system_clock;

pub use clock::Clock;
pub use system_clock::SystemClock;

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{DateTime, Utc};

    use super::Clock;

    /// Test clock pinned to a fixed instant.
    pub(crate) struct FixedClock(pub DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }
}
