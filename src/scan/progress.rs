use std::time::Instant;

use log::info;

/// Scan progress reporting, throttled to one line per half hour of
/// simulated time. Purely a logging side effect.
#[derive(Debug)]
pub struct Progress {
    total_bytes: Option<u64>,
    bytes_read: u64,
    started: Instant,
    last_bucket: i64,
}

impl Progress {
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            total_bytes,
            bytes_read: 0,
            started: Instant::now(),
            last_bucket: -1,
        }
    }

    pub fn consumed(&mut self, bytes: usize) {
        self.bytes_read += bytes as u64;
    }

    pub fn tick(&mut self, sim_time: f64, distinct_segments: usize) {
        let bucket = (sim_time / 1800.0) as i64;
        if bucket <= self.last_bucket {
            return;
        }
        self.last_bucket = bucket;
        let elapsed = self.started.elapsed().as_secs();
        match self.total_bytes {
            Some(total) if total > 0 => info!(
                "{:.1}h sim | {:.1}% of trace | {} segments | {}s elapsed",
                sim_time / 3600.0,
                self.bytes_read as f64 / total as f64 * 100.0,
                distinct_segments,
                elapsed
            ),
            _ => info!(
                "{:.1}h sim | {} MiB read | {} segments | {}s elapsed",
                sim_time / 3600.0,
                self.bytes_read >> 20,
                distinct_segments,
                elapsed
            ),
        }
    }
}
