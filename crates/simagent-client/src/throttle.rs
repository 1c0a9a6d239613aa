use std::time::{Duration, Instant};

/// Rate limiter for repetitive diagnostics.
///
/// During an extended outage the connect loop retries without backoff; the
/// throttle keeps that from flooding the log with one line per attempt.
/// Explicit state, constructed once and passed where needed.
#[derive(Debug)]
pub struct LogThrottle {
    period: Duration,
    last_emit: Option<Instant>,
}

impl LogThrottle {
    /// Create a throttle that is immediately ready.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_emit: None,
        }
    }

    /// Returns true if at least one period has elapsed since the last
    /// emission (or nothing has been emitted yet), and records the emission.
    pub fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last_emit {
            Some(last) if now.duration_since(last) < self.period => false,
            _ => {
                self.last_emit = Some(now);
                true
            }
        }
    }
}
