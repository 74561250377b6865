use serde_json::Value;
use tracing::info;

use crate::models::{ConvertError, DiarizationTimeline};
use crate::stages::{
    NullSpeakerPolicy, OrderConfig, OverlapReport, ParseConfig, RoundConfig, TranscriptFormat,
    TrimConfig, parse_transcript, resolve_null_speakers, round_timeline, sort_timeline,
    trim_timeline, validate_overlaps,
};

/// Configuration for a full conversion
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub parse: ParseConfig,
    pub null_policy: NullSpeakerPolicy,
    /// Windowing is skipped entirely when `None`
    pub trim: Option<TrimConfig>,
    pub order: OrderConfig,
    pub round: RoundConfig,
}

/// Counters collected while converting one transcript
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub format: TranscriptFormat,
    pub segments_parsed: usize,
    pub unattributed: usize,
    pub unattributed_resolved: usize,
    pub unattributed_dropped: usize,
    pub trimmed_away: usize,
    pub overlaps: usize,
    pub segments_out: usize,
}

/// Output of a successful conversion
#[derive(Debug)]
pub struct Conversion {
    pub timeline: DiarizationTimeline,
    pub overlaps: OverlapReport,
    pub report: PipelineReport,
}

/// Parse a JSON string and run the full pipeline
pub fn convert_json(json: &str, config: &PipelineConfig) -> Result<Conversion, ConvertError> {
    let value: Value = serde_json::from_str(json)?;
    run_pipeline(&value, config)
}

/// Run every stage on an already-parsed transcript
///
/// Detect → extract → resolve nulls → trim (optional) → sort → round →
/// validate. Any fatal error stops the run before output is produced.
pub fn run_pipeline(value: &Value, config: &PipelineConfig) -> Result<Conversion, ConvertError> {
    // Stage 0: detect vendor and extract segments
    let parsed = parse_transcript(value, &config.parse)?;
    let format = parsed.format;
    let segments_parsed = parsed.segments.len();
    let unattributed = parsed.unattributed_count();

    // Stage 1: null speakers
    let resolution = resolve_null_speakers(parsed.segments, config.null_policy);
    let mut timeline = DiarizationTimeline::new(resolution.segments);

    // Stage 2: optional window
    let mut trimmed_away = 0;
    if let Some(trim) = config.trim.as_ref().filter(|t| t.is_requested()) {
        let trimmed = trim_timeline(timeline, trim)?;
        trimmed_away = trimmed.removed;
        timeline = trimmed.timeline;
    }

    // Stage 3: ordering
    let timeline = sort_timeline(timeline, &config.order);

    // Stage 4: rounding, then overlap check on the values that will be written
    let timeline = round_timeline(timeline, &config.round)?;
    let overlaps = validate_overlaps(&timeline)?;

    let report = PipelineReport {
        format,
        segments_parsed,
        unattributed,
        unattributed_resolved: resolution.resolved,
        unattributed_dropped: resolution.dropped,
        trimmed_away,
        overlaps: overlaps.overlaps.len(),
        segments_out: timeline.len(),
    };

    info!(
        "Complete: {} {} segments in, {} out ({} unattributed, {} resolved, {} dropped, {} trimmed, {} overlaps)",
        report.format,
        report.segments_parsed,
        report.segments_out,
        report.unattributed,
        report.unattributed_resolved,
        report.unattributed_dropped,
        report.trimmed_away,
        report.overlaps
    );

    Ok(Conversion {
        timeline,
        overlaps,
        report,
    })
}
