/// Blocks requested per `get_blocks_range_by_topoheight` call.
pub const BATCH_SIZE: u64 = 20;
/// Range requests in flight at once.
pub const MAX_WORKERS: usize = 6;
pub const SECONDS_IN_24H: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    pub batch_size: u64,
    pub max_workers: usize,
    pub window_secs: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            max_workers: MAX_WORKERS,
            window_secs: SECONDS_IN_24H,
        }
    }
}

impl WindowConfig {
    /// Overrides from the command line; zero is clamped to one.
    pub fn new(batch_size: Option<u64>, max_workers: Option<usize>) -> Self {
        let d = Self::default();
        Self {
            batch_size: batch_size.unwrap_or(d.batch_size).max(1),
            max_workers: max_workers.unwrap_or(d.max_workers).max(1),
            window_secs: d.window_secs,
        }
    }

    #[cfg(test)]
    pub fn with_window_secs(mut self, secs: u64) -> Self {
        self.window_secs = secs;
        self
    }

    /// Oldest timestamp (ms) still inside the window ending at `now_ms`.
    pub fn cutoff_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.window_secs.saturating_mul(1000))
    }
}

/// Walks `[0, tip]` backwards in inclusive chunks of `batch` topoheights,
/// newest chunk first. A tip of zero yields nothing.
#[derive(Debug, Clone)]
pub struct TopoRanges {
    next_end: Option<u64>,
    batch: u64,
}

impl TopoRanges {
    pub fn new(tip: u64, batch: u64) -> Self {
        Self {
            next_end: (tip > 0).then_some(tip),
            batch: batch.max(1),
        }
    }
}

impl Iterator for TopoRanges {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.next_end?;
        let start = end.saturating_sub(self.batch - 1);
        self.next_end = start.checked_sub(1);
        Some((start, end))
    }
}
