use serde::{Deserialize, Serialize};

use super::{ConvertError, RawSegment};

/// Azure ticks are 100 ns; this converts them to seconds
pub const AZURE_TICKS_PER_SECOND: f64 = 10_000_000.0;

/// Root of an Azure batch transcription result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AzureTranscript {
    #[serde(rename = "AudioFileResults")]
    pub audio_file_results: Vec<AzureAudioFileResult>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AzureAudioFileResult {
    #[serde(rename = "SegmentResults")]
    pub segment_results: Vec<AzureSegmentResult>,
}

/// One recognized phrase with diarization info
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AzureSegmentResult {
    /// Opaque speaker identifier; null when Azure could not attribute the phrase.
    /// The key itself is required.
    #[serde(rename = "SpeakerId", deserialize_with = "Option::deserialize")]
    pub speaker_id: Option<String>,
    /// Start offset in ticks
    #[serde(rename = "Offset")]
    pub offset: i64,
    /// Duration in ticks
    #[serde(rename = "Duration")]
    pub duration: i64,
}

impl AzureTranscript {
    /// Extract segments in transcript order, converting ticks with `tick_divisor`.
    ///
    /// Fails unless the transcript holds exactly one audio file result.
    pub fn segments(&self, tick_divisor: f64) -> Result<Vec<RawSegment>, ConvertError> {
        let [audio_file] = self.audio_file_results.as_slice() else {
            return Err(ConvertError::malformed(format!(
                "expected exactly one AudioFileResults entry, found {}",
                self.audio_file_results.len()
            )));
        };

        Ok(audio_file
            .segment_results
            .iter()
            .map(|seg| {
                let start = seg.offset as f64 / tick_divisor;
                let end = start + seg.duration as f64 / tick_divisor;
                RawSegment::new(seg.speaker_id.clone(), start, end)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_azure_transcript() {
        let json = r#"{
            "AudioFileResults": [{
                "SegmentResults": [
                    {"SpeakerId": "A", "Offset": 0, "Duration": 10000000},
                    {"SpeakerId": null, "Offset": 10000000, "Duration": 5000000},
                    {"SpeakerId": null, "Offset": 15000000, "Duration": 10000000}
                ]
            }]
        }"#;

        let transcript: AzureTranscript = serde_json::from_str(json).unwrap();
        let segments = transcript.segments(AZURE_TICKS_PER_SECOND).unwrap();

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], RawSegment::new(Some("A".into()), 0.0, 1.0));
        assert_eq!(segments[1], RawSegment::new(None, 1.0, 1.5));
        assert!(segments[2].is_unattributed());
        assert_eq!(segments[2].end, 2.5);
    }

    #[test]
    fn test_missing_speaker_key_is_rejected() {
        let json = r#"{"AudioFileResults": [{"SegmentResults": [
            {"Offset": 0, "Duration": 10000000}
        ]}]}"#;

        assert!(serde_json::from_str::<AzureTranscript>(json).is_err());
    }

    #[test]
    fn test_legacy_divisor() {
        let json = r#"{"AudioFileResults": [{"SegmentResults": [
            {"SpeakerId": "A", "Offset": 2000000, "Duration": 1000000}
        ]}]}"#;

        let transcript: AzureTranscript = serde_json::from_str(json).unwrap();
        let segments = transcript.segments(1_000_000.0).unwrap();

        assert_eq!(segments[0].start, 2.0);
        assert_eq!(segments[0].end, 3.0);
    }

    #[test]
    fn test_requires_single_audio_file() {
        let none: AzureTranscript = serde_json::from_str(r#"{"AudioFileResults": []}"#).unwrap();
        let two: AzureTranscript = serde_json::from_str(
            r#"{"AudioFileResults": [{"SegmentResults": []}, {"SegmentResults": []}]}"#,
        )
        .unwrap();

        assert!(matches!(
            none.segments(AZURE_TICKS_PER_SECOND),
            Err(ConvertError::MalformedTranscript(_))
        ));
        assert!(matches!(
            two.segments(AZURE_TICKS_PER_SECOND),
            Err(ConvertError::MalformedTranscript(_))
        ));
    }
}
