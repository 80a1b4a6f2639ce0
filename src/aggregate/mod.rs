//! Accumulators owned by the scan pass.
//!
//! Both tables have a single writer (the scan loop) and are only read after
//! finalization; their size is bounded by distinct-vehicle and
//! distinct-segment cardinality, never by sample volume.

pub mod edges;
pub mod trajectories;

pub use edges::{EdgeAggregator, EdgeSpeeds, segment_of_lane};
pub use trajectories::TrajectoryAccumulator;
