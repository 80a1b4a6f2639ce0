use hashbrown::HashMap;

pub const MS_TO_KMH: f64 = 3.6;

/// Lane ids are `<segment-id>_<lane-index>`; everything before the last
/// underscore names the owning segment. Ids without an underscore are
/// already segment ids.
pub fn segment_of_lane(lane_id: &str) -> &str {
    lane_id
        .rsplit_once('_')
        .map_or(lane_id, |(segment, _)| segment)
}

/// Running speed sum and sample count per road segment.
#[derive(Debug, Default)]
pub struct EdgeAggregator {
    segments: HashMap<String, (f64, u64)>,
}

impl EdgeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one sampled vehicle record into its owning segment.
    pub fn push(&mut self, lane_id: &str, speed_ms: f64) {
        let (sum, count) = self
            .segments
            .entry_ref(segment_of_lane(lane_id))
            .or_insert((0.0, 0));
        *sum += speed_ms * MS_TO_KMH;
        *count += 1;
    }

    /// Distinct segments seen so far.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn finish(self) -> EdgeSpeeds {
        EdgeSpeeds {
            segments: self.segments,
        }
    }
}

/// Finalized aggregate: segment id → (speed sum km/h, sample count).
/// Segments without samples are absent.
#[derive(Debug, Default, PartialEq)]
pub struct EdgeSpeeds {
    segments: HashMap<String, (f64, u64)>,
}

impl EdgeSpeeds {
    pub fn mean_kmh(&self, segment_id: &str) -> Option<f64> {
        self.segments
            .get(segment_id)
            .map(|&(sum, count)| sum / count as f64)
    }

    pub fn sample_count(&self, segment_id: &str) -> Option<u64> {
        self.segments.get(segment_id).map(|&(_, count)| count)
    }

    /// (segment id, mean speed km/h, sample count), unordered.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64, u64)> + '_ {
        self.segments
            .iter()
            .map(|(id, &(sum, count))| (id.as_str(), sum / count as f64, count))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_suffix_is_stripped_to_the_owning_segment() {
        assert_eq!(segment_of_lane("405#1_0"), "405#1");
        assert_eq!(segment_of_lane("some_edge_12"), "some_edge");
        assert_eq!(segment_of_lane("plain"), "plain");
    }

    #[test]
    fn mean_is_sum_over_count_in_kmh() {
        let mut agg = EdgeAggregator::new();
        agg.push("12#0_0", 5.0);
        agg.push("12#0_1", 10.0);
        let speeds = agg.finish();
        assert_eq!(speeds.sample_count("12#0"), Some(2));
        let mean = speeds.mean_kmh("12#0").unwrap();
        assert!((mean - 27.0).abs() < 1e-9); // (18 + 36) / 2
    }

    #[test]
    fn unsampled_segments_are_absent() {
        let speeds = EdgeAggregator::new().finish();
        assert!(speeds.is_empty());
        assert_eq!(speeds.mean_kmh("12#0"), None);
        assert_eq!(speeds.sample_count("12#0"), None);
    }
}
