use crate::models::{ConvertError, DiarizationSegment, DiarizationTimeline};

/// Largest precision that still round-trips through an f64
pub const MAX_PRECISION: u32 = 15;

/// Configuration for Stage 4 rounding
#[derive(Debug, Clone)]
pub struct RoundConfig {
    /// Decimal places kept on every boundary
    pub precision: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

/// Round `value` to `precision` decimals, ties to even
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round_ties_even() / scale
}

/// Execute Stage 4: round all boundaries for presentation
pub fn round_timeline(
    timeline: DiarizationTimeline,
    config: &RoundConfig,
) -> Result<DiarizationTimeline, ConvertError> {
    if config.precision > MAX_PRECISION {
        return Err(ConvertError::InvalidPrecision(config.precision));
    }

    Ok(timeline
        .into_iter()
        .map(|seg| {
            DiarizationSegment::new(
                seg.speaker_id,
                round_to(seg.start, config.precision),
                round_to(seg.end, config.precision),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.5, 0), 2.0);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(1.26, 1), 1.3);
    }

    #[test]
    fn test_round_is_idempotent() {
        for &value in &[0.0, 0.1, 1.005, 2.675, 12.345678, 1234.5678, 0.3333333] {
            for precision in 0..=6 {
                let once = round_to(value, precision);
                assert_eq!(round_to(once, precision), once, "{} @ {}", value, precision);
            }
        }
    }

    #[test]
    fn test_round_timeline() {
        let timeline = DiarizationTimeline::new(vec![DiarizationSegment::new("A", 0.123, 1.987)]);

        let rounded = round_timeline(timeline, &RoundConfig::default()).unwrap();
        assert_eq!(rounded.segments[0], DiarizationSegment::new("A", 0.12, 1.99));
    }

    #[test]
    fn test_rejects_excessive_precision() {
        let config = RoundConfig { precision: 16 };

        assert!(matches!(
            round_timeline(DiarizationTimeline::default(), &config),
            Err(ConvertError::InvalidPrecision(16))
        ));
    }
}
