//! Key extraction for assembling logical roads from fragmented segments.
//!
//! Segment ids follow the network builder's conventions: a leading `-`
//! marks the reverse direction of a road, a trailing `#<n>` marks the n-th
//! piece of a road split at junctions, and a leading `:` marks internal
//! junction geometry.

use crate::model::RoadSegment;

/// Segments merge into one logical road when base id, lane count and
/// direction all agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub base: String,
    pub lanes: u32,
    pub reversed: bool,
}

pub fn group_key(segment: &RoadSegment) -> GroupKey {
    GroupKey {
        base: base_id(&segment.id).to_owned(),
        lanes: segment.lanes,
        reversed: segment.id.starts_with('-'),
    }
}

/// Numeric stem of a segment id: `-123#2` → `123`. Ids without a numeric
/// stem are their own base.
pub fn base_id(segment_id: &str) -> &str {
    let stem = segment_id.strip_prefix('-').unwrap_or(segment_id);
    let digits = stem.len() - stem.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        segment_id
    } else {
        &stem[..digits]
    }
}

/// Position of a segment within its split chain: `123#4` → 4; no suffix or
/// a non-numeric one → 0.
pub fn split_index(segment_id: &str) -> u32 {
    segment_id
        .rsplit_once('#')
        .and_then(|(_, index)| index.parse().ok())
        .unwrap_or(0)
}

/// Internal junction geometry, never rendered.
pub fn is_internal(segment_id: &str) -> bool {
    segment_id.starts_with(':')
}
