use serde::{Deserialize, Serialize};

/// A segment as extracted from a vendor transcript, before null resolution.
///
/// `speaker` is `None` when the vendor could not attribute the span.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSegment {
    pub speaker: Option<String>,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl RawSegment {
    pub fn new(speaker: Option<String>, start: f64, end: f64) -> Self {
        Self { speaker, start, end }
    }

    pub fn is_unattributed(&self) -> bool {
        self.speaker.is_none()
    }
}

/// A speaker interval in the canonical output.
///
/// Serialized as a `[speaker, start, end]` triple, the shape the DER scorer
/// loads for both reference and hypothesis files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64, f64)", into = "(String, f64, f64)")]
pub struct DiarizationSegment {
    pub speaker_id: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl DiarizationSegment {
    pub fn new(speaker_id: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            speaker_id: speaker_id.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether this segment runs past the start of `next`
    pub fn overlaps_next(&self, next: &DiarizationSegment) -> bool {
        self.end > next.start
    }
}

impl From<(String, f64, f64)> for DiarizationSegment {
    fn from((speaker_id, start, end): (String, f64, f64)) -> Self {
        Self {
            speaker_id,
            start,
            end,
        }
    }
}

impl From<DiarizationSegment> for (String, f64, f64) {
    fn from(segment: DiarizationSegment) -> Self {
        (segment.speaker_id, segment.start, segment.end)
    }
}

/// An ordered list of speaker intervals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiarizationTimeline {
    pub segments: Vec<DiarizationSegment>,
}

impl DiarizationTimeline {
    pub fn new(segments: Vec<DiarizationSegment>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Latest end time across all segments, if any
    pub fn max_end(&self) -> Option<f64> {
        self.segments.iter().map(|s| s.end).reduce(f64::max)
    }

    /// Distinct speaker IDs in first-appearance order
    pub fn speakers(&self) -> Vec<&str> {
        let mut speakers: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if !speakers.contains(&segment.speaker_id.as_str()) {
                speakers.push(&segment.speaker_id);
            }
        }
        speakers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiarizationSegment> {
        self.segments.iter()
    }
}

impl From<Vec<DiarizationSegment>> for DiarizationTimeline {
    fn from(segments: Vec<DiarizationSegment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<DiarizationSegment> for DiarizationTimeline {
    fn from_iter<I: IntoIterator<Item = DiarizationSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DiarizationTimeline {
    type Item = DiarizationSegment;
    type IntoIter = std::vec::IntoIter<DiarizationSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}
