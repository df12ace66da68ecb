//! Monotonic timestamps for pointer events.

use web_time::Instant;

/// Millisecond clock for stamping pointer events.
///
/// Hosts that already receive event timestamps (browsers, winit) should pass
/// those through instead. `web_time` keeps this usable on wasm.
#[derive(Debug, Clone, Copy)]
pub struct EventClock {
    origin: Instant,
}

impl EventClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }

    pub fn now_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

impl Default for EventClock {
    fn default() -> Self {
        Self::new()
    }
}
