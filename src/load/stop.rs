use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Run-wide "stop issuing requests" flag.
///
/// Sessions poll it between requests, so an in-flight request always
/// completes (or times out) before the session notices.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag. Returns `true` only for the call that flipped it.
    #[must_use]
    pub fn stop(&self) -> bool {
        !self.flag.swap(true, Ordering::AcqRel)
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
