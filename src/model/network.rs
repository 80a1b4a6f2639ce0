use geo::{Coord, LineString};
use hashbrown::HashMap;
use serde::Deserialize;

/// Linear transform from the network's projected plane to geographic
/// coordinates.
///
/// The same degree-per-meter constants are reused when lane geometries are
/// offset sideways, so offsets and positions stay consistent on the map.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Projection {
    pub offset_x: f64,
    pub offset_y: f64,
    pub origin_lon: f64,
    pub origin_lat: f64,
    pub meters_per_degree_lon: f64,
    pub meters_per_degree_lat: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            origin_lon: 28.83,
            origin_lat: 47.02,
            meters_per_degree_lon: 75_000.0,
            meters_per_degree_lat: 111_000.0,
        }
    }
}

impl Projection {
    pub fn to_lonlat(&self, c: Coord) -> Coord {
        Coord {
            x: self.origin_lon + (c.x - self.offset_x) / self.meters_per_degree_lon,
            y: self.origin_lat + (c.y - self.offset_y) / self.meters_per_degree_lat,
        }
    }

    pub fn geographic_shape(&self, shape: &LineString) -> LineString {
        shape.coords().map(|c| self.to_lonlat(*c)).collect()
    }
}

/// One directed segment of the static network description.
#[derive(Debug, Clone)]
pub struct RoadSegment {
    pub id: String,
    pub lanes: u32,
    /// Free-flow speed in m/s, as the network description carries it.
    pub freeflow_ms: f64,
    pub length_m: f64,
    /// Centerline polyline in projected coordinates.
    pub shape: LineString,
    pub roundabout: bool,
}

/// Read-only segment table shared by the congestion builder and the
/// validator.
#[derive(Debug, Default)]
pub struct RoadNetwork {
    pub segments: HashMap<String, RoadSegment>,
    pub projection: Projection,
}

impl RoadNetwork {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&RoadSegment> {
        self.segments.get(id)
    }
}
