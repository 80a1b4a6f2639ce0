use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::Error;
use crate::config::CongestionSettings;
use crate::model::Projection;

use super::LogicalRoad;

/// Renders logical roads into the congestion map: one line feature per
/// lane, shifted perpendicular to the centerline so parallel lanes stay
/// visually distinct. A single-lane road emits exactly its unshifted
/// centerline.
pub fn roads_to_geojson(
    roads: &[LogicalRoad],
    projection: &Projection,
    settings: &CongestionSettings,
) -> Result<FeatureCollection, Error> {
    let mut features = Vec::new();
    for road in roads {
        road_features(road, projection, settings, &mut features)?;
    }
    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn roads_to_geojson_string(
    roads: &[LogicalRoad],
    projection: &Projection,
    settings: &CongestionSettings,
) -> Result<String, Error> {
    serde_json::to_string(&roads_to_geojson(roads, projection, settings)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn road_features(
    road: &LogicalRoad,
    projection: &Projection,
    settings: &CongestionSettings,
    out: &mut Vec<Feature>,
) -> Result<(), Error> {
    let lanes = road.key.lanes.max(1);
    if lanes == 1 {
        out.push(lane_feature(road, &road.shape, 1)?);
        return Ok(());
    }
    for lane in 0..lanes {
        // Offsets are symmetric about the centerline.
        let offset_m = (f64::from(lane) - f64::from(lanes - 1) / 2.0) * settings.lane_width;
        let shifted = super::geometry::offset_polyline(&road.shape, offset_m, projection);
        out.push(lane_feature(road, &shifted, lanes)?);
    }
    Ok(())
}

fn lane_feature(road: &LogicalRoad, line: &LineString, lanes: u32) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(line));
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "speed_ratio": (road.speed_ratio * 1000.0).round() / 1000.0,
            "peak_flow": road.peak_flow as i64,
            "color": road.level.color(),
            "lane_count": lanes,
            "is_roundabout": road.roundabout,
        }
    });
    serde_json::from_value(value).map_err(|e: serde_json::Error| Error::GeoJsonError(e.to_string()))
}
