use geo::{Coord, LineString};

use crate::model::Projection;

/// Coincident-endpoint tolerance when chaining split segments, in degrees
/// (roughly five meters).
pub const MERGE_TOLERANCE_DEG: f64 = 5e-5;

/// Concatenates ordered geographic polylines into one, dropping a chunk's
/// first vertex when it coincides with the previous chunk's last vertex so
/// shared junction points do not become zero-length kinks.
pub fn merge_polylines<I>(chunks: I) -> LineString
where
    I: IntoIterator<Item = LineString>,
{
    let mut merged: Vec<Coord> = Vec::new();
    for chunk in chunks {
        let mut coords = chunk.0.into_iter();
        if let Some(first) = coords.next() {
            let duplicate = merged.last().is_some_and(|last| {
                (first.x - last.x).abs() < MERGE_TOLERANCE_DEG
                    && (first.y - last.y).abs() < MERGE_TOLERANCE_DEG
            });
            if !duplicate {
                merged.push(first);
            }
            merged.extend(coords);
        }
    }
    LineString::new(merged)
}

/// Shifts a geographic polyline sideways by `offset_m` meters.
///
/// The local direction is a forward difference at the first vertex, a
/// backward difference at the last and a central difference elsewhere; the
/// left-hand normal is scaled into degrees through the projection's
/// degree-per-meter constants. Vertices with a degenerate (zero-length)
/// local direction stay in place.
pub fn offset_polyline(line: &LineString, offset_m: f64, projection: &Projection) -> LineString {
    let points = &line.0;
    let n = points.len();
    if n < 2 {
        return line.clone();
    }

    let mut shifted = Vec::with_capacity(n);
    for (i, point) in points.iter().enumerate() {
        let (dx, dy) = if i == 0 {
            (points[1].x - points[0].x, points[1].y - points[0].y)
        } else if i == n - 1 {
            (
                points[n - 1].x - points[n - 2].x,
                points[n - 1].y - points[n - 2].y,
            )
        } else {
            (
                points[i + 1].x - points[i - 1].x,
                points[i + 1].y - points[i - 1].y,
            )
        };
        let length = dx.hypot(dy);
        if length == 0.0 {
            shifted.push(*point);
            continue;
        }
        shifted.push(Coord {
            x: point.x + (-dy / length) * offset_m / projection.meters_per_degree_lon,
            y: point.y + (dx / length) * offset_m / projection.meters_per_degree_lat,
        });
    }
    LineString::new(shifted)
}
