//! Road network loading from a prepared segment table (CSV).
//!
//! Rows are deserialized permissively into [`RawSegment`] and validated one
//! by one; a malformed row is skipped with a warning. A missing or empty
//! table is a fatal error.

mod raw_types;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use geo::{Coord, Euclidean, Length, LineString};
use hashbrown::HashMap;
use log::{info, warn};

use crate::Error;
use crate::model::{Projection, RoadNetwork, RoadSegment};
use raw_types::RawSegment;

/// Loads the segment table from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or contains no usable
/// segments.
pub fn road_network_from_csv(path: &Path, projection: Projection) -> Result<RoadNetwork, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("failed to open network table '{}': {e}", path.display()),
        )
    })?;
    let network = road_network_from_reader(file, projection)?;
    info!(
        "loaded {} road segments from {}",
        network.len(),
        path.display()
    );
    Ok(network)
}

/// Loads the segment table from any reader carrying CSV data.
pub fn road_network_from_reader<R: Read>(
    reader: R,
    projection: Projection,
) -> Result<RoadNetwork, Error> {
    let mut segments = HashMap::new();
    for raw in csv::Reader::from_reader(reader)
        .deserialize::<RawSegment>()
        .filter_map(Result::ok)
    {
        match process_segment(&raw) {
            Some(segment) => {
                segments.insert(segment.id.clone(), segment);
            }
            None => warn!("skipping malformed network row '{}'", raw.id),
        }
    }

    if segments.is_empty() {
        return Err(Error::InvalidData(
            "network table contains no usable segments".to_owned(),
        ));
    }
    Ok(RoadNetwork {
        segments,
        projection,
    })
}

fn process_segment(raw: &RawSegment) -> Option<RoadSegment> {
    if raw.id.is_empty() {
        return None;
    }
    let lanes: u32 = raw.lanes.trim().parse().ok().filter(|&n| n >= 1)?;
    let freeflow_ms: f64 = raw.speed.trim().parse().ok().filter(|s| *s > 0.0)?;
    let shape = parse_shape(&raw.shape)?;
    let length_m = raw
        .length
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|l| *l > 0.0)
        .unwrap_or_else(|| Euclidean.length(&shape));

    Some(RoadSegment {
        id: raw.id.clone(),
        lanes,
        freeflow_ms,
        length_m,
        shape,
        roundabout: matches!(raw.roundabout.trim(), "1" | "true" | "yes"),
    })
}

/// Parses a SUMO plain-format shape string (`"x,y x,y ..."`) into a
/// projected polyline. At least two vertices are required.
fn parse_shape(shape: &str) -> Option<LineString> {
    let mut coords = Vec::new();
    for pair in shape.split_whitespace() {
        let (x, y) = pair.split_once(',')?;
        coords.push(Coord {
            x: x.parse().ok()?,
            y: y.parse().ok()?,
        });
    }
    if coords.len() < 2 {
        return None;
    }
    Some(LineString::new(coords))
}
