use serde::Serialize;

/// Severity bands in ascending order of observed speed ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    Gridlock,
    Severe,
    Heavy,
    Moderate,
    Light,
    FreeFlow,
}

impl CongestionLevel {
    /// Maps a speed ratio onto its band given the five ascending
    /// thresholds. A ratio exactly on a threshold falls into the less
    /// severe band (`classify(0.25, ..)` is `Severe`, not `Gridlock`).
    pub fn classify(ratio: f64, thresholds: &[f64; 5]) -> Self {
        match thresholds.iter().position(|&t| ratio < t) {
            Some(0) => Self::Gridlock,
            Some(1) => Self::Severe,
            Some(2) => Self::Heavy,
            Some(3) => Self::Moderate,
            Some(4) => Self::Light,
            _ => Self::FreeFlow,
        }
    }

    /// RGB triple used by the map renderer.
    pub fn color(self) -> [u8; 3] {
        match self {
            Self::Gridlock => [204, 0, 0],
            Self::Severe => [255, 68, 0],
            Self::Heavy => [255, 136, 0],
            Self::Moderate => [255, 187, 0],
            Self::Light => [136, 204, 0],
            Self::FreeFlow => [0, 170, 68],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: [f64; 5] = [0.25, 0.45, 0.60, 0.75, 0.90];

    #[test]
    fn bands_cover_the_ratio_axis_in_order() {
        assert_eq!(
            CongestionLevel::classify(0.1, &THRESHOLDS),
            CongestionLevel::Gridlock
        );
        assert_eq!(
            CongestionLevel::classify(0.5, &THRESHOLDS),
            CongestionLevel::Heavy
        );
        assert_eq!(
            CongestionLevel::classify(1.2, &THRESHOLDS),
            CongestionLevel::FreeFlow
        );
    }

    #[test]
    fn threshold_values_belong_to_the_less_severe_band() {
        assert_eq!(
            CongestionLevel::classify(0.25, &THRESHOLDS),
            CongestionLevel::Severe
        );
        assert_eq!(
            CongestionLevel::classify(0.90, &THRESHOLDS),
            CongestionLevel::FreeFlow
        );
    }
}
