use serde::Deserialize;

/// One row of the segment table as it appears on disk. All fields are kept
/// as strings and validated by the processor so one bad cell never aborts
/// the load.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawSegment {
    pub id: String,
    pub lanes: String,
    /// Free-flow speed, m/s.
    pub speed: String,
    /// Segment length in meters; derived from the shape when absent.
    pub length: String,
    /// Projected polyline, SUMO plain format: `"x,y x,y ..."`.
    pub shape: String,
    pub roundabout: String,
}
