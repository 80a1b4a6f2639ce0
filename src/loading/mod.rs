//! Loading of the static road network description.

pub mod network;

pub use network::{road_network_from_csv, road_network_from_reader};
