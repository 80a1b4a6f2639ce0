//! Congestion map assembly: filter, group, merge, classify, render.
//!
//! Operates on the bounded tables the scan pass produced; groups are
//! independent, so they are processed in parallel and emitted in key order
//! for deterministic output.

pub mod geometry;
pub mod grouping;
pub mod severity;
mod to_geojson;

pub use severity::CongestionLevel;
pub use to_geojson::{roads_to_geojson, roads_to_geojson_string};

use geo::LineString;
use itertools::Itertools;
use log::info;
use rayon::prelude::*;

use crate::aggregate::EdgeSpeeds;
use crate::aggregate::edges::MS_TO_KMH;
use crate::config::CongestionSettings;
use crate::model::{RoadNetwork, RoadSegment};
use grouping::GroupKey;

/// One merged multi-segment road with its aggregated congestion signal.
#[derive(Debug, Clone)]
pub struct LogicalRoad {
    pub key: GroupKey,
    /// Merged geographic centerline.
    pub shape: LineString,
    /// Length-weighted mean of per-segment speed / free-flow speed.
    pub speed_ratio: f64,
    /// Length-weighted flow estimate, samples per `flow_scale`.
    pub peak_flow: f64,
    pub level: CongestionLevel,
    pub roundabout: bool,
}

/// Assembles logical roads from the static network and the finalized speed
/// aggregate. Internal junction segments and segments without samples never
/// contribute; a group whose merged geometry degenerates below two vertices
/// is dropped entirely.
pub fn build_roads(
    network: &RoadNetwork,
    speeds: &EdgeSpeeds,
    settings: &CongestionSettings,
) -> Vec<LogicalRoad> {
    let mut groups: Vec<(GroupKey, Vec<&RoadSegment>)> = network
        .segments
        .values()
        .filter(|segment| !grouping::is_internal(&segment.id))
        .filter(|segment| speeds.sample_count(&segment.id).is_some())
        .map(|segment| (grouping::group_key(segment), segment))
        .into_group_map()
        .into_iter()
        .collect();
    groups.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let roads: Vec<LogicalRoad> = groups
        .into_par_iter()
        .filter_map(|(key, members)| build_road(key, members, network, speeds, settings))
        .collect();

    info!(
        "assembled {} logical roads from {} aggregated segments",
        roads.len(),
        speeds.len()
    );
    roads
}

fn build_road(
    key: GroupKey,
    mut members: Vec<&RoadSegment>,
    network: &RoadNetwork,
    speeds: &EdgeSpeeds,
    settings: &CongestionSettings,
) -> Option<LogicalRoad> {
    // Split order reproduces the physical traversal order of the road.
    members.sort_unstable_by_key(|segment| grouping::split_index(&segment.id));

    let shape = geometry::merge_polylines(
        members
            .iter()
            .map(|segment| network.projection.geographic_shape(&segment.shape)),
    );
    if shape.0.len() < 2 {
        return None;
    }

    // Length-weighting prevents a short stub from dominating a long road.
    let mut weight = 0.0;
    let mut ratio_sum = 0.0;
    let mut flow_sum = 0.0;
    for segment in &members {
        let Some(mean_kmh) = speeds.mean_kmh(&segment.id) else {
            continue;
        };
        let Some(count) = speeds.sample_count(&segment.id) else {
            continue;
        };
        let freeflow_kmh = (segment.freeflow_ms * MS_TO_KMH).max(settings.min_freeflow_kmh);
        let w = segment.length_m;
        ratio_sum += (mean_kmh / freeflow_kmh) * w;
        flow_sum += (count as f64 / settings.flow_scale) * w;
        weight += w;
    }
    if weight <= 0.0 {
        return None;
    }

    let speed_ratio = ratio_sum / weight;
    Some(LogicalRoad {
        roundabout: members.iter().any(|segment| segment.roundabout),
        level: CongestionLevel::classify(speed_ratio, &settings.thresholds),
        peak_flow: flow_sum / weight,
        key,
        shape,
        speed_ratio,
    })
}

#[cfg(test)]
mod tests {
    use geo::Coord;
    use hashbrown::HashMap;

    use super::*;
    use crate::aggregate::EdgeAggregator;
    use crate::model::Projection;

    fn segment(id: &str, lanes: u32, shape: &[(f64, f64)]) -> RoadSegment {
        RoadSegment {
            id: id.to_owned(),
            lanes,
            freeflow_ms: 10.0,
            length_m: 100.0,
            shape: shape.iter().map(|&(x, y)| Coord { x, y }).collect(),
            roundabout: false,
        }
    }

    fn network(segments: Vec<RoadSegment>) -> RoadNetwork {
        RoadNetwork {
            segments: segments
                .into_iter()
                .map(|s| (s.id.clone(), s))
                .collect::<HashMap<_, _>>(),
            projection: Projection::default(),
        }
    }

    #[test]
    fn only_sampled_non_internal_segments_form_roads() {
        let net = network(vec![
            segment("12#0", 2, &[(0.0, 0.0), (100.0, 0.0)]),
            segment("12#1", 2, &[(100.0, 0.0), (180.0, 0.0)]),
            segment(":junction_0", 1, &[(0.0, 0.0), (5.0, 0.0)]),
        ]);
        let mut agg = EdgeAggregator::new();
        agg.push("12#0_0", 5.0);
        agg.push(":junction_0_0", 5.0);
        let speeds = agg.finish();

        let roads = build_roads(&net, &speeds, &CongestionSettings::default());
        assert_eq!(roads.len(), 1);
        // Only 12#0 was sampled, so only its shape contributes.
        assert_eq!(roads[0].shape.0.len(), 2);
        assert_eq!(roads[0].key.base, "12");
    }

    #[test]
    fn unsampled_groups_emit_nothing() {
        let net = network(vec![segment("12#0", 2, &[(0.0, 0.0), (100.0, 0.0)])]);
        let speeds = EdgeAggregator::new().finish();
        assert!(build_roads(&net, &speeds, &CongestionSettings::default()).is_empty());
    }

    #[test]
    fn ratio_uses_the_freeflow_floor_and_length_weights() {
        let mut slow = segment("7#0", 1, &[(0.0, 0.0), (300.0, 0.0)]);
        slow.length_m = 300.0;
        slow.freeflow_ms = 1.0; // 3.6 km/h, floored to 10 km/h
        let mut fast = segment("7#1", 1, &[(300.0, 0.0), (400.0, 0.0)]);
        fast.length_m = 100.0;
        fast.freeflow_ms = 10.0; // 36 km/h
        let net = network(vec![slow, fast]);

        let mut agg = EdgeAggregator::new();
        agg.push("7#0_0", 1.25); // 4.5 km/h -> ratio 0.45 against the floor
        agg.push("7#1_0", 5.0); // 18 km/h -> ratio 0.5
        let speeds = agg.finish();

        let roads = build_roads(&net, &speeds, &CongestionSettings::default());
        assert_eq!(roads.len(), 1);
        let expected = (0.45 * 300.0 + 0.5 * 100.0) / 400.0;
        assert!((roads[0].speed_ratio - expected).abs() < 1e-9);
    }
}
