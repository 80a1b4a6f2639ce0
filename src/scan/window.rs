use crate::config::{Aggregation, TrajectoryWindow};

/// Window membership of the current timestep, re-evaluated once per
/// boundary line and applied to every sample of that second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    /// The second lies in the (buffered) trajectory window.
    pub in_trajectory: bool,
    /// The second lies in a peak interval and on the sampling stride.
    pub sample_aggregation: bool,
}

impl WindowState {
    pub fn any(self) -> bool {
        self.in_trajectory || self.sample_aggregation
    }
}

/// Evaluates trajectory and aggregation window membership per timestep.
#[derive(Debug, Clone)]
pub struct WindowFilter {
    trajectory_start: f64,
    trajectory_end: f64,
    buffer: f64,
    peaks: Vec<[f64; 2]>,
    stride: u32,
    stop_after: f64,
}

impl WindowFilter {
    pub fn new(window: &TrajectoryWindow, aggregation: &Aggregation) -> Self {
        let latest_end = aggregation
            .peaks
            .iter()
            .map(|peak| peak[1])
            .fold(window.end, f64::max);
        Self {
            trajectory_start: window.start,
            trajectory_end: window.end,
            buffer: window.buffer,
            peaks: aggregation.peaks.clone(),
            stride: aggregation.stride,
            stop_after: latest_end + window.buffer,
        }
    }

    pub fn at(&self, t: f64) -> WindowState {
        let in_trajectory =
            t >= self.trajectory_start - self.buffer && t <= self.trajectory_end + self.buffer;
        let in_peak = self.peaks.iter().any(|&[start, end]| t >= start && t <= end);
        let on_stride = self.stride != 0 && (t as u64).is_multiple_of(u64::from(self.stride));
        WindowState {
            in_trajectory,
            sample_aggregation: in_peak && on_stride,
        }
    }

    /// Once the time cursor passes the latest window end plus the buffer,
    /// no later record can fall in any window; time is monotonic, so the
    /// scan may stop.
    pub fn exhausted(&self, t: f64) -> bool {
        t > self.stop_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> WindowFilter {
        WindowFilter::new(
            &TrajectoryWindow {
                start: 100.0,
                end: 300.0,
                buffer: 20.0,
            },
            &Aggregation {
                stride: 30,
                peaks: vec![[100.0, 300.0], [500.0, 700.0]],
            },
        )
    }

    #[test]
    fn trajectory_window_is_buffered_and_inclusive() {
        let f = filter();
        assert!(f.at(80.0).in_trajectory);
        assert!(f.at(320.0).in_trajectory);
        assert!(!f.at(79.0).in_trajectory);
        assert!(!f.at(321.0).in_trajectory);
    }

    #[test]
    fn aggregation_needs_peak_membership_and_stride_alignment() {
        let f = filter();
        assert!(f.at(120.0).sample_aggregation);
        assert!(!f.at(130.0).sample_aggregation, "off stride");
        assert!(!f.at(330.0).sample_aggregation, "between peaks");
        assert!(f.at(600.0).sample_aggregation, "second peak");
    }

    #[test]
    fn exhaustion_uses_the_latest_window_end_plus_buffer() {
        let f = filter();
        assert!(!f.at(600.0).in_trajectory);
        assert!(!f.exhausted(720.0));
        assert!(f.exhausted(720.1));
    }
}
