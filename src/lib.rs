//! Distills very large floating-car-data traces from a microscopic traffic
//! simulation into visualization-ready artifacts: capped per-vehicle
//! trajectories for interactive playback, a color-coded multi-lane
//! congestion map, and a corridor validation report against reference
//! speeds.
//!
//! The trace is scanned in a single streaming pass under a fixed memory
//! budget; only cardinality-bounded accumulator tables grow. The post-scan
//! stages (grouping, geometry merging, classification) operate on those
//! bounded tables.

pub mod aggregate;
pub mod config;
pub mod congestion;
mod error;
pub mod loading;
pub mod model;
pub mod scan;
pub mod validate;

pub use error::Error;

// Re-export key components
pub use crate::aggregate::{EdgeSpeeds, segment_of_lane};
pub use crate::config::Config;
pub use crate::congestion::{
    CongestionLevel, LogicalRoad, build_roads, roads_to_geojson, roads_to_geojson_string,
};
pub use crate::loading::{road_network_from_csv, road_network_from_reader};
pub use crate::model::{Projection, RoadNetwork, RoadSegment, Trajectory, Waypoint};
pub use crate::scan::{ScanOutcome, scan_trace, scan_trace_file};
pub use crate::validate::{Corridor, CorridorReport, Verdict, validate_corridors};
