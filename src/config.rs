//! Pipeline configuration.
//!
//! Defaults reproduce the constants the analysis shipped with (Chișinău
//! morning/evening peaks and corridor references); every value can be
//! overridden from a TOML/JSON document since all structs deserialize with
//! per-field defaults.

use serde::Deserialize;

use crate::model::Projection;
use crate::validate::Corridor;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub trajectory_window: TrajectoryWindow,
    pub aggregation: Aggregation,
    pub trajectories: TrajectoryLimits,
    pub congestion: CongestionSettings,
    pub projection: Projection,
    pub corridors: Vec<Corridor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trajectory_window: TrajectoryWindow::default(),
            aggregation: Aggregation::default(),
            trajectories: TrajectoryLimits::default(),
            congestion: CongestionSettings::default(),
            projection: Projection::default(),
            corridors: default_corridors(),
        }
    }
}

/// Inclusive playback window for trajectory extraction, widened by a
/// symmetric buffer. The buffer also serves as the scan's early-stop
/// tolerance past the last configured window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrajectoryWindow {
    pub start: f64,
    pub end: f64,
    pub buffer: f64,
}

impl Default for TrajectoryWindow {
    fn default() -> Self {
        // Morning peak, 07:00-09:00.
        Self {
            start: 7.0 * 3600.0,
            end: 9.0 * 3600.0,
            buffer: 60.0,
        }
    }
}

/// Peak intervals and subsampling stride for speed aggregation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Aggregation {
    /// Only timesteps with `time % stride == 0` are sampled.
    pub stride: u32,
    /// Inclusive `[start, end]` peak intervals, seconds of simulated time.
    pub peaks: Vec<[f64; 2]>,
}

impl Default for Aggregation {
    fn default() -> Self {
        Self {
            stride: 30,
            peaks: vec![
                [7.0 * 3600.0, 9.0 * 3600.0],
                [17.0 * 3600.0, 20.0 * 3600.0],
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrajectoryLimits {
    /// Trajectories shorter than this are dropped at finalization.
    pub min_waypoints: usize,
    /// Hard cap on emitted trajectories; the longest ones win, ties break
    /// on vehicle id.
    pub max_vehicles: usize,
}

impl Default for TrajectoryLimits {
    fn default() -> Self {
        Self {
            min_waypoints: 5,
            max_vehicles: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CongestionSettings {
    /// Sideways spacing between rendered lanes, projected-length units.
    pub lane_width: f64,
    /// Floor applied to free-flow speeds so speed ratios stay bounded on
    /// walking-speed service roads.
    pub min_freeflow_kmh: f64,
    /// Divisor turning a segment's sample count into a flow estimate.
    pub flow_scale: f64,
    /// Ascending speed-ratio thresholds separating the six severity bands.
    pub thresholds: [f64; 5],
}

impl Default for CongestionSettings {
    fn default() -> Self {
        Self {
            lane_width: 3.2,
            min_freeflow_kmh: 10.0,
            flow_scale: 4.0,
            thresholds: [0.25, 0.45, 0.60, 0.75, 0.90],
        }
    }
}

fn default_corridors() -> Vec<Corridor> {
    let reference = [
        ("Calea Ieșilor → Centru", [28.830, 28.855, 46.960, 46.975], 8.6),
        ("Botanica → Primărie", [28.840, 28.870, 46.955, 46.990], 7.1),
        ("Moscova → UTM", [28.845, 28.870, 47.005, 47.030], 8.8),
        ("Alba Iulia → Bd. Dacia", [28.800, 28.860, 47.005, 47.045], 10.7),
        ("Ciocana → Centru", [28.890, 28.950, 46.990, 47.030], 9.7),
        ("Muncești → Bd. Ștefan", [28.820, 28.865, 46.950, 46.985], 12.5),
    ];
    reference
        .into_iter()
        .map(|(name, bbox, reference_kmh)| Corridor {
            name: name.to_owned(),
            bbox,
            reference_kmh,
        })
        .collect()
}
