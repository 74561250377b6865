use std::str::FromStr;

use tracing::{info, warn};

use crate::models::{ConvertError, DiarizationSegment, RawSegment};

/// How to treat segments the vendor left without a speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullSpeakerPolicy {
    /// Drop every unattributed segment
    #[default]
    Ignore,
    /// Inherit the nearest attributed speaker before the segment
    AssignPrevious,
    /// Inherit the nearest attributed speaker after the segment
    AssignNext,
}

impl FromStr for NullSpeakerPolicy {
    type Err = ConvertError;

    /// Matches case-insensitively on the first letter, so `i`, `Ignore`,
    /// `prev` and `NEXT` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('i') => Ok(NullSpeakerPolicy::Ignore),
            Some('p') => Ok(NullSpeakerPolicy::AssignPrevious),
            Some('n') => Ok(NullSpeakerPolicy::AssignNext),
            _ => Err(ConvertError::InvalidNullPolicy(s.to_string())),
        }
    }
}

/// Result of Stage 1
#[derive(Debug)]
pub struct ResolutionResult {
    /// Fully attributed segments in their original order
    pub segments: Vec<DiarizationSegment>,
    /// Unattributed segments that inherited a neighbour's speaker
    pub resolved: usize,
    /// Unattributed segments removed
    pub dropped: usize,
}

/// Execute Stage 1: null speaker resolution
///
/// Both directional policies are single linear passes that only look at the
/// nearest attributed neighbour, so a run of unattributed segments inherits
/// one speaker. Segments with no neighbour in the scan direction are dropped.
pub fn resolve_null_speakers(segments: Vec<RawSegment>, policy: NullSpeakerPolicy) -> ResolutionResult {
    let result = match policy {
        NullSpeakerPolicy::Ignore => {
            let total = segments.len();
            let kept: Vec<DiarizationSegment> = segments
                .into_iter()
                .filter_map(|seg| {
                    let speaker = seg.speaker?;
                    Some(DiarizationSegment::new(speaker, seg.start, seg.end))
                })
                .collect();

            ResolutionResult {
                dropped: total - kept.len(),
                segments: kept,
                resolved: 0,
            }
        }
        NullSpeakerPolicy::AssignPrevious => inherit_in_order(segments, "previous"),
        NullSpeakerPolicy::AssignNext => {
            let mut reversed = segments;
            reversed.reverse();

            let mut result = inherit_in_order(reversed, "next");
            result.segments.reverse();
            result
        }
    };

    info!(
        "Stage 1: {:?} kept {} segments ({} resolved, {} dropped)",
        policy,
        result.segments.len(),
        result.resolved,
        result.dropped
    );

    result
}

/// Walk `segments` front to back, filling unattributed ones with the last
/// attributed speaker seen
fn inherit_in_order(segments: Vec<RawSegment>, direction: &str) -> ResolutionResult {
    let mut resolved_segments = Vec::with_capacity(segments.len());
    let mut last_speaker: Option<String> = None;
    let mut resolved = 0;
    let mut dropped = 0;

    for seg in segments {
        let speaker = match seg.speaker {
            Some(speaker) => {
                last_speaker = Some(speaker.clone());
                speaker
            }
            None => match &last_speaker {
                Some(speaker) => {
                    resolved += 1;
                    speaker.clone()
                }
                None => {
                    warn!(
                        "Dropping unattributed segment ({:.3}, {:.3}): no {} speaker to inherit",
                        seg.start, seg.end, direction
                    );
                    dropped += 1;
                    continue;
                }
            },
        };

        resolved_segments.push(DiarizationSegment::new(speaker, seg.start, seg.end));
    }

    ResolutionResult {
        segments: resolved_segments,
        resolved,
        dropped,
    }
}
