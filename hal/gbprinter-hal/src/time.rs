//! Monotonic time source

/// Milliseconds since boot
///
/// Must never go backwards. Deadlines in the core are plain millisecond
/// instants compared against this value.
pub trait Monotonic {
    /// Current uptime in milliseconds
    fn now_ms(&self) -> u64;
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
