//! Timing helpers

use std::time::Instant;

use log::debug;

/// Logs the elapsed time of a scope when dropped:
///
/// ```
/// use tiler::metrics::LogTimer;
/// let _timer = LogTimer::new("load_geometries");
/// ```
pub struct LogTimer {
    name: &'static str,
    start: Instant,
}

impl LogTimer {
    pub fn new(name: &'static str) -> Self {
        LogTimer {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for LogTimer {
    fn drop(&mut self) {
        debug!("{} took {:?}", self.name, self.start.elapsed());
    }
}
