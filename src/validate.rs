//! Comparison of aggregated corridor speeds against externally measured
//! reference speeds. Purely a reported diagnostic; nothing here feeds back
//! into the pipeline outputs.

use geo::{Coord, Intersects, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::aggregate::EdgeSpeeds;
use crate::model::RoadNetwork;

/// A named bounding box with an externally measured reference speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corridor {
    pub name: String,
    /// `[lon_min, lon_max, lat_min, lat_max]`, inclusive.
    pub bbox: [f64; 4],
    pub reference_kmh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Simulated speed within 1.5x of the reference.
    Good,
    /// Between 1.5x and 2.5x: the model is too fast here.
    NeedsTuning,
    /// Above 2.5x: the model under-congests this corridor.
    UnderCongested,
    /// No aggregated segment fell inside the corridor box.
    NoData,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorridorReport {
    pub name: String,
    pub reference_kmh: f64,
    pub simulated_kmh: Option<f64>,
    pub ratio: Option<f64>,
    pub verdict: Verdict,
}

/// Compares the mean aggregated speed of each corridor against its
/// reference. A segment belongs to a corridor when its first geographic
/// shape vertex falls inside the box.
pub fn validate_corridors(
    network: &RoadNetwork,
    speeds: &EdgeSpeeds,
    corridors: &[Corridor],
) -> Vec<CorridorReport> {
    corridors
        .iter()
        .map(|corridor| corridor_report(network, speeds, corridor))
        .collect()
}

fn corridor_report(
    network: &RoadNetwork,
    speeds: &EdgeSpeeds,
    corridor: &Corridor,
) -> CorridorReport {
    let [lon_min, lon_max, lat_min, lat_max] = corridor.bbox;
    let bbox = Rect::new(
        Coord {
            x: lon_min,
            y: lat_min,
        },
        Coord {
            x: lon_max,
            y: lat_max,
        },
    );

    let mut sum = 0.0;
    let mut count = 0_u64;
    for segment in network.segments.values() {
        let Some(mean_kmh) = speeds.mean_kmh(&segment.id) else {
            continue;
        };
        let Some(&first) = segment.shape.0.first() else {
            continue;
        };
        let anchor = Point::from(network.projection.to_lonlat(first));
        if bbox.intersects(&anchor) {
            sum += mean_kmh;
            count += 1;
        }
    }

    if count == 0 {
        return CorridorReport {
            name: corridor.name.clone(),
            reference_kmh: corridor.reference_kmh,
            simulated_kmh: None,
            ratio: None,
            verdict: Verdict::NoData,
        };
    }

    let simulated_kmh = sum / count as f64;
    let ratio = simulated_kmh / corridor.reference_kmh;
    let verdict = if ratio < 1.5 {
        Verdict::Good
    } else if ratio < 2.5 {
        Verdict::NeedsTuning
    } else {
        Verdict::UnderCongested
    };
    CorridorReport {
        name: corridor.name.clone(),
        reference_kmh: corridor.reference_kmh,
        simulated_kmh: Some(simulated_kmh),
        ratio: Some(ratio),
        verdict,
    }
}
