use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

/// One playback sample of one vehicle, serialized as the compact array
/// `[second, lon, lat, speed_kmh]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub second: u32,
    pub lon: f64,
    pub lat: f64,
    pub speed_kmh: f64,
}

impl Waypoint {
    /// Builds a waypoint from a raw trace sample: geographic position plus
    /// speed in m/s. Coordinates are rounded to 6 decimals and speed to one,
    /// which keeps the serialized output compact.
    pub fn from_sample(second: u32, lon: f64, lat: f64, speed_ms: f64) -> Self {
        Self {
            second,
            lon: round_to(lon, 1e6),
            lat: round_to(lat, 1e6),
            speed_kmh: round_to(speed_ms * 3.6, 10.0),
        }
    }
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

impl Serialize for Waypoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(4))?;
        seq.serialize_element(&self.second)?;
        seq.serialize_element(&self.lon)?;
        seq.serialize_element(&self.lat)?;
        seq.serialize_element(&self.speed_kmh)?;
        seq.end()
    }
}

/// Ordered waypoint sequence of one vehicle; times strictly increase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub id: String,
    pub waypoints: Vec<Waypoint>,
}
