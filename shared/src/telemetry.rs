use std::time::Instant;

/// Wall-clock timer for reporting how long the model and database calls took.
pub struct Telemetry {
    start: Instant,
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }

    /// Human-readable elapsed time, e.g. "1.24s" or "87ms".
    pub fn elapsed_label(&self) -> String {
        let elapsed = self.elapsed();
        if elapsed.as_secs() >= 1 {
            format!("{:.2}s", elapsed.as_secs_f64())
        } else {
            format!("{}ms", elapsed.as_millis())
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}
