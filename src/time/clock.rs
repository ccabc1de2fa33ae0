use chrono::{DateTime, Utc};

/// A port that provides the **current instant** for the application.
///
/// # Purpose
/// This trait abstracts access to "now" so that:
///
/// - Token-expiry arithmetic does **not** depend on system time
/// - Implementations can be swapped (system clock, fixed clock, mock, etc.)
/// - Tests can be deterministic and time-independent
///
/// # Typical Implementations
/// - [`SystemClock`](crate::time::SystemClock): uses the OS clock
/// - A fixed clock returning a constant instant (for testing)
pub trait Clock: Send + Sync {
    /// Returns the current instant as a UTC [`DateTime`].
    fn now(&self) -> DateTime<Utc>;
}
