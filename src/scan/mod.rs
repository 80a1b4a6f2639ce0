//! Single-pass streaming scan of the trace file.
//!
//! The trace has unbounded length, so nothing per-record or per-timestep is
//! retained: every sample is folded into an accumulator immediately and only
//! the accumulator tables (bounded by vehicle and segment cardinality) grow.

pub mod fields;
pub mod progress;
pub mod window;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::Error;
use crate::aggregate::{EdgeAggregator, EdgeSpeeds, TrajectoryAccumulator};
use crate::config::Config;
use crate::model::{Trajectory, Waypoint};
use fields::LineKind;
use progress::Progress;
use window::{WindowFilter, WindowState};

/// Everything one scan pass produces.
#[derive(Debug, Default, PartialEq)]
pub struct ScanOutcome {
    /// Finalized trajectories: filtered, capped, sorted by vehicle id.
    pub trajectories: Vec<Trajectory>,
    /// Per-segment speed aggregate over the sampled peak timesteps.
    pub edge_speeds: EdgeSpeeds,
    pub timesteps_seen: u64,
    /// The scan hit the early-stop bound instead of the end of input.
    pub stopped_early: bool,
}

/// Opens and scans a trace file. A missing or unreadable file is fatal.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or reading fails mid-scan.
pub fn scan_trace_file(path: &Path, config: &Config) -> Result<ScanOutcome, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("failed to open trace '{}': {e}", path.display()),
        )
    })?;
    let total = file.metadata().ok().map(|m| m.len());
    scan_trace(BufReader::with_capacity(1 << 20, file), total, config)
}

/// Scans a line-oriented trace in a single pass.
///
/// Boundary lines advance the time cursor and re-evaluate window
/// membership once per timestep; vehicle lines are folded into the
/// trajectory and edge accumulators while their windows are open, and only
/// the attributes an open window needs are extracted. A line with missing
/// or malformed attributes is skipped. The scan stops as soon as the time
/// cursor passes the last configured window end plus the trajectory
/// buffer; time is monotonically non-decreasing, so all in-window data has
/// been seen by then.
pub fn scan_trace<R: BufRead>(
    mut reader: R,
    total_bytes: Option<u64>,
    config: &Config,
) -> Result<ScanOutcome, Error> {
    let filter = WindowFilter::new(&config.trajectory_window, &config.aggregation);
    let mut progress = Progress::new(total_bytes);
    let mut trajectories = TrajectoryAccumulator::new();
    let mut edges = EdgeAggregator::new();

    let mut state = WindowState::default();
    let mut current_second: u32 = 0;
    let mut timesteps_seen = 0_u64;
    let mut stopped_early = false;
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        progress.consumed(read);

        match fields::classify(&line) {
            LineKind::Boundary => {
                let Some(t) = fields::attr_f64(&line, "time") else {
                    debug!("boundary line without a parsable time attribute, skipped");
                    continue;
                };
                if filter.exhausted(t) {
                    debug!("time cursor at {t:.0}s is past every window, stopping scan");
                    stopped_early = true;
                    break;
                }
                state = filter.at(t);
                current_second = t as u32;
                timesteps_seen += 1;
                progress.tick(t, edges.len());
            }
            LineKind::Vehicle if state.any() => {
                if state.sample_aggregation
                    && let (Some(lane), Some(speed)) =
                        (fields::attr(&line, "lane"), fields::attr_f64(&line, "speed"))
                {
                    edges.push(lane, speed);
                }
                if state.in_trajectory
                    && let (Some(id), Some(x), Some(y), Some(speed)) = (
                        fields::attr(&line, "id"),
                        fields::attr_f64(&line, "x"),
                        fields::attr_f64(&line, "y"),
                        fields::attr_f64(&line, "speed"),
                    )
                {
                    trajectories.push(id, Waypoint::from_sample(current_second, x, y, speed));
                }
            }
            _ => {}
        }
    }

    info!(
        "scan finished: {} timesteps, {} vehicles seen, {} segments aggregated{}",
        timesteps_seen,
        trajectories.len(),
        edges.len(),
        if stopped_early { " (stopped early)" } else { "" }
    );

    Ok(ScanOutcome {
        trajectories: trajectories.finish(
            config.trajectories.min_waypoints,
            config.trajectories.max_vehicles,
        ),
        edge_speeds: edges.finish(),
        timesteps_seen,
        stopped_early,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::config::{Aggregation, TrajectoryWindow};

    fn test_config() -> Config {
        Config {
            trajectory_window: TrajectoryWindow {
                start: 100.0,
                end: 300.0,
                buffer: 20.0,
            },
            aggregation: Aggregation {
                stride: 10,
                peaks: vec![[100.0, 300.0]],
            },
            ..Config::default()
        }
    }

    fn scan(trace: &str, config: &Config) -> ScanOutcome {
        scan_trace(Cursor::new(trace), None, config).unwrap()
    }

    #[test]
    fn malformed_sample_lines_are_skipped_not_fatal() {
        let trace = "\
<timestep time=\"100.00\">
<vehicle id=\"v1\" x=\"28.80\" y=\"46.95\" lane=\"12#0_0\" speed=\"5.00\"/>
<vehicle id=\"v2\" x=\"oops\" y=\"46.95\" lane=\"12#0_0\" speed=\"5.00\"/>
<vehicle id=\"v3\" x=\"28.80\" y=\"46.95\" lane=\"12#0_0\"/>
</timestep>
";
        let config = test_config();
        let outcome = scan(trace, &config);
        // v2 (bad x) and v3 (no speed) lose their waypoint. The aggregate
        // only needs lane+speed, so it still counts v1 and v2.
        assert_eq!(outcome.edge_speeds.sample_count("12#0"), Some(2));
        assert_eq!(outcome.timesteps_seen, 1);
    }

    #[test]
    fn boundary_without_time_keeps_previous_window_state() {
        let trace = "\
<timestep time=\"100.00\">
<timestep>
<vehicle id=\"v1\" x=\"28.80\" y=\"46.95\" lane=\"12#0_0\" speed=\"5.00\"/>
";
        let config = test_config();
        let outcome = scan(trace, &config);
        assert_eq!(outcome.edge_speeds.sample_count("12#0"), Some(1));
    }

    #[test]
    fn stops_early_past_the_last_window() {
        let trace = "\
<timestep time=\"100.00\">
<vehicle id=\"v1\" x=\"28.80\" y=\"46.95\" lane=\"12#0_0\" speed=\"5.00\"/>
<timestep time=\"400.00\">
<vehicle id=\"v1\" x=\"28.80\" y=\"46.95\" lane=\"12#0_0\" speed=\"5.00\"/>
";
        let config = test_config();
        let outcome = scan(trace, &config);
        assert!(outcome.stopped_early);
        assert_eq!(outcome.timesteps_seen, 1);
        assert_eq!(outcome.edge_speeds.sample_count("12#0"), Some(1));
    }
}
