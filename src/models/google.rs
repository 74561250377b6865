use serde::{Deserialize, Serialize};

use super::{ConvertError, RawSegment};

/// Root response from Google Cloud Speech-to-Text (long-running recognize)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleTranscript {
    pub results: Vec<GoogleResult>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleResult {
    #[serde(default)]
    pub alternatives: Vec<GoogleAlternative>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleAlternative {
    #[serde(default)]
    pub words: Vec<GoogleWord>,
    #[serde(default)]
    pub transcript: Option<String>,
}

/// A single recognized word
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleWord {
    /// Duration string such as `"1.230s"`
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Absent for words the diarizer did not attribute
    #[serde(default)]
    pub speaker_tag: Option<i64>,
    #[serde(default)]
    pub word: Option<String>,
}

impl GoogleTranscript {
    /// Extract one segment per speaker-tagged word, in transcript order.
    ///
    /// Untagged words are skipped. Every result must carry exactly one
    /// alternative with at least one word.
    pub fn segments(&self) -> Result<Vec<RawSegment>, ConvertError> {
        let mut segments = Vec::new();

        for (index, result) in self.results.iter().enumerate() {
            let [alternative] = result.alternatives.as_slice() else {
                return Err(ConvertError::malformed(format!(
                    "result {} has {} alternatives, expected exactly one",
                    index,
                    result.alternatives.len()
                )));
            };

            if alternative.words.is_empty() {
                return Err(ConvertError::malformed(format!(
                    "result {} has no words",
                    index
                )));
            }

            for word in &alternative.words {
                let Some(tag) = word.speaker_tag else {
                    continue;
                };

                let start = parse_duration(word.start_time.as_deref(), "startTime")?;
                let end = parse_duration(word.end_time.as_deref(), "endTime")?;
                segments.push(RawSegment::new(Some(tag.to_string()), start, end));
            }
        }

        Ok(segments)
    }
}

/// Parse a protobuf-JSON duration like `"1.230s"` into seconds
pub fn parse_duration(value: Option<&str>, field: &str) -> Result<f64, ConvertError> {
    let value = value.ok_or_else(|| ConvertError::malformed(format!("word is missing {}", field)))?;

    let seconds = value.strip_suffix('s').ok_or_else(|| {
        ConvertError::malformed(format!("{} {:?} has no `s` suffix", field, value))
    })?;

    seconds
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConvertError::malformed(format!("{} {:?} is not a finite number", field, value)))
}
