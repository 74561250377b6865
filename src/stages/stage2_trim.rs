use tracing::{debug, info};

use crate::models::{ConvertError, DiarizationSegment, DiarizationTimeline};

/// Configuration for Stage 2 windowing
#[derive(Debug, Clone, Default)]
pub struct TrimConfig {
    /// Window start in seconds; 0.0 when unset
    pub start_time: Option<f64>,
    /// Window end in seconds; the latest segment end when unset
    pub end_time: Option<f64>,
    /// Shift the output so the window start becomes 0.0
    pub offset_start: bool,
}

impl TrimConfig {
    /// Whether a boundary was actually requested
    pub fn is_requested(&self) -> bool {
        self.start_time.is_some() || self.end_time.is_some()
    }
}

/// Result of Stage 2
#[derive(Debug)]
pub struct TrimResult {
    pub timeline: DiarizationTimeline,
    /// Segments entirely outside the window
    pub removed: usize,
    /// Segments shortened at a window boundary
    pub clipped: usize,
}

/// Execute Stage 2: clip the timeline to `[start_time, end_time]`
///
/// Segments starting at or after the window end, or ending at or before the
/// window start, are removed. The rest are clipped to the window.
pub fn trim_timeline(
    timeline: DiarizationTimeline,
    config: &TrimConfig,
) -> Result<TrimResult, ConvertError> {
    let start_time = config.start_time.unwrap_or(0.0);
    let end_time = match config.end_time.or_else(|| timeline.max_end()) {
        Some(end) => end,
        None => {
            // Empty timeline and no explicit end: nothing to window
            return Ok(TrimResult {
                timeline,
                removed: 0,
                clipped: 0,
            });
        }
    };

    if start_time.is_nan() || end_time.is_nan() || start_time >= end_time {
        return Err(ConvertError::InvalidWindow {
            start: start_time,
            end: end_time,
        });
    }

    let offset = if config.offset_start { start_time } else { 0.0 };
    let total = timeline.len();
    let mut clipped = 0;

    let segments: Vec<DiarizationSegment> = timeline
        .into_iter()
        .filter(|seg| seg.start < end_time && seg.end > start_time)
        .map(|seg| {
            let start = seg.start.max(start_time);
            let end = seg.end.min(end_time);
            if start != seg.start || end != seg.end {
                debug!(
                    "Clipped {} ({:.3}, {:.3}) to ({:.3}, {:.3}), {:.3}s removed",
                    seg.speaker_id,
                    seg.start,
                    seg.end,
                    start,
                    end,
                    seg.duration() - (end - start)
                );
                clipped += 1;
            }
            DiarizationSegment::new(seg.speaker_id, start - offset, end - offset)
        })
        .collect();

    let removed = total - segments.len();
    info!(
        "Stage 2: window [{:.3}, {:.3}] kept {} segments ({} removed, {} clipped)",
        start_time,
        end_time,
        segments.len(),
        removed,
        clipped
    );

    Ok(TrimResult {
        timeline: DiarizationTimeline::new(segments),
        removed,
        clipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> DiarizationTimeline {
        DiarizationTimeline::new(vec![
            DiarizationSegment::new("A", 0.0, 1.0),
            DiarizationSegment::new("B", 0.5, 2.5),
            DiarizationSegment::new("A", 2.5, 4.0),
            DiarizationSegment::new("B", 4.0, 5.0),
        ])
    }

    #[test]
    fn test_window_clips_with_offset() {
        let config = TrimConfig {
            start_time: Some(1.0),
            end_time: Some(3.0),
            offset_start: true,
        };

        let input = DiarizationTimeline::new(vec![DiarizationSegment::new("A", 0.5, 2.5)]);
        let result = trim_timeline(input, &config).unwrap();

        assert_eq!(result.timeline.segments, vec![DiarizationSegment::new("A", 0.0, 1.5)]);
        assert_eq!(result.clipped, 1);
    }

    #[test]
    fn test_removes_segments_outside_window() {
        let config = TrimConfig {
            start_time: Some(1.0),
            end_time: Some(4.0),
            offset_start: false,
        };

        let result = trim_timeline(timeline(), &config).unwrap();

        // (0,1) ends at the window start, (4,5) starts at the window end
        assert_eq!(
            result.timeline.segments,
            vec![
                DiarizationSegment::new("B", 1.0, 2.5),
                DiarizationSegment::new("A", 2.5, 4.0),
            ]
        );
        assert_eq!(result.removed, 2);
        assert_eq!(result.clipped, 1);
    }

    #[test]
    fn test_full_window_is_identity() {
        let config = TrimConfig {
            start_time: Some(0.0),
            end_time: Some(5.0),
            offset_start: false,
        };

        let result = trim_timeline(timeline(), &config).unwrap();
        assert_eq!(result.timeline, timeline());
        assert_eq!(result.removed + result.clipped, 0);
    }

    #[test]
    fn test_default_end_is_latest_segment_end() {
        let config = TrimConfig {
            start_time: Some(2.0),
            end_time: None,
            offset_start: true,
        };

        let result = trim_timeline(timeline(), &config).unwrap();
        assert_eq!(result.timeline.len(), 3);
        assert_eq!(result.timeline.max_end(), Some(3.0));
    }

    #[test]
    fn test_rejects_inverted_window() {
        let config = TrimConfig {
            start_time: Some(3.0),
            end_time: Some(1.0),
            offset_start: false,
        };

        assert!(matches!(
            trim_timeline(timeline(), &config),
            Err(ConvertError::InvalidWindow { .. })
        ));

        let empty_window = TrimConfig {
            start_time: Some(2.0),
            end_time: Some(2.0),
            offset_start: false,
        };
        assert!(trim_timeline(timeline(), &empty_window).is_err());
    }

    #[test]
    fn test_start_past_default_end_is_rejected() {
        let config = TrimConfig {
            start_time: Some(10.0),
            end_time: None,
            offset_start: false,
        };

        assert!(trim_timeline(timeline(), &config).is_err());
    }

    #[test]
    fn test_empty_timeline_without_end() {
        let config = TrimConfig {
            start_time: Some(1.0),
            end_time: None,
            offset_start: false,
        };

        let result = trim_timeline(DiarizationTimeline::default(), &config).unwrap();
        assert!(result.timeline.is_empty());
    }
}
