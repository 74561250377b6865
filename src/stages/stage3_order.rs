use std::str::FromStr;

use tracing::{info, warn};

use crate::models::{ConvertError, DiarizationSegment, DiarizationTimeline};

/// Boundary used as the sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingKey {
    /// Canonical order: ascending end time
    #[default]
    End,
    /// Ascending start time, consistent with what the overlap check assumes
    Start,
}

impl FromStr for OrderingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "end" => Ok(OrderingKey::End),
            "start" => Ok(OrderingKey::Start),
            other => Err(format!("unknown ordering key {:?} (expected start or end)", other)),
        }
    }
}

/// Configuration for Stage 3 ordering
#[derive(Debug, Clone, Default)]
pub struct OrderConfig {
    pub key: OrderingKey,
}

/// Two adjacent segments where the first runs past the start of the second
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    /// Index of the later segment
    pub index: usize,
    pub prev: DiarizationSegment,
    pub curr: DiarizationSegment,
}

impl Overlap {
    pub fn duration(&self) -> f64 {
        self.prev.end.min(self.curr.end) - self.curr.start
    }
}

/// Result of overlap validation
#[derive(Debug, Default)]
pub struct OverlapReport {
    pub overlaps: Vec<Overlap>,
}

impl OverlapReport {
    pub fn is_clean(&self) -> bool {
        self.overlaps.is_empty()
    }

    pub fn total_overlap_seconds(&self) -> f64 {
        self.overlaps.iter().map(Overlap::duration).sum()
    }
}

/// Execute Stage 3a: stable sort by the configured key
///
/// Ties keep their relative order, so sorting twice is a no-op.
pub fn sort_timeline(timeline: DiarizationTimeline, config: &OrderConfig) -> DiarizationTimeline {
    let mut segments = timeline.segments;

    match config.key {
        OrderingKey::End => segments.sort_by(|a, b| a.end.total_cmp(&b.end)),
        OrderingKey::Start => segments.sort_by(|a, b| a.start.total_cmp(&b.start)),
    }

    DiarizationTimeline::new(segments)
}

/// Execute Stage 3b: check adjacent segments
///
/// Decreasing start times abort with `SortInvariantViolation`. Overlaps are
/// logged and collected but do not fail.
///
/// The check is on start times even though the canonical sort is on end
/// times, so a short segment nested inside a longer one fails here under
/// `OrderingKey::End`.
pub fn validate_overlaps(timeline: &DiarizationTimeline) -> Result<OverlapReport, ConvertError> {
    let mut report = OverlapReport::default();

    if timeline.len() <= 1 {
        info!("Stage 3: trivially small timeline ({} segments)", timeline.len());
        return Ok(report);
    }

    for (i, pair) in timeline.segments.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);

        if prev.start > curr.start {
            return Err(ConvertError::SortInvariantViolation {
                index: i + 1,
                prev_start: prev.start,
                prev_end: prev.end,
                curr_start: curr.start,
                curr_end: curr.end,
            });
        }

        if prev.overlaps_next(curr) {
            warn!(
                "Overlap between {} ({}, {}) and {} ({}, {})",
                prev.speaker_id, prev.start, prev.end, curr.speaker_id, curr.start, curr.end
            );
            report.overlaps.push(Overlap {
                index: i + 1,
                prev: prev.clone(),
                curr: curr.clone(),
            });
        }
    }

    info!(
        "Stage 3: {} overlaps ({:.3}s total)",
        report.overlaps.len(),
        report.total_overlap_seconds()
    );

    Ok(report)
}
