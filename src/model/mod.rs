//! Static road network model and output data types.

pub mod network;
pub mod trajectory;

pub use network::{Projection, RoadNetwork, RoadSegment};
pub use trajectory::{Trajectory, Waypoint};
