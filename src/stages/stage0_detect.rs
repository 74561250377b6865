use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::models::{
    AZURE_TICKS_PER_SECOND, AzureTranscript, ConvertError, GoogleTranscript, RawSegment,
};

/// STT vendor that produced a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat {
    Azure,
    Google,
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptFormat::Azure => write!(f, "Azure"),
            TranscriptFormat::Google => write!(f, "Google"),
        }
    }
}

/// Configuration for Stage 0 extraction
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Azure ticks per second. Older tooling used 1e6.
    pub tick_divisor: f64,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            tick_divisor: AZURE_TICKS_PER_SECOND,
        }
    }
}

/// Result of Stage 0
#[derive(Debug)]
pub struct ParsedTranscript {
    pub format: TranscriptFormat,
    /// Segments in transcript order, possibly unattributed
    pub segments: Vec<RawSegment>,
}

impl ParsedTranscript {
    pub fn unattributed_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_unattributed()).count()
    }
}

/// Classify a transcript by its top-level keys
pub fn detect_format(value: &Value) -> Result<TranscriptFormat, ConvertError> {
    let object = value.as_object().ok_or(ConvertError::UnsupportedFormat)?;

    if object.contains_key("AudioFileResults") {
        Ok(TranscriptFormat::Azure)
    } else if object.contains_key("results") {
        Ok(TranscriptFormat::Google)
    } else {
        Err(ConvertError::UnsupportedFormat)
    }
}

/// Execute Stage 0: detect the vendor and extract its segments
pub fn parse_transcript(value: &Value, config: &ParseConfig) -> Result<ParsedTranscript, ConvertError> {
    if !(config.tick_divisor.is_finite() && config.tick_divisor > 0.0) {
        return Err(ConvertError::InvalidTickDivisor(config.tick_divisor));
    }

    let format = detect_format(value)?;
    info!("{} transcript detected", format);

    let segments = match format {
        TranscriptFormat::Azure => AzureTranscript::deserialize(value)
            .map_err(|e| ConvertError::malformed(format!("Azure schema: {}", e)))?
            .segments(config.tick_divisor)?,
        TranscriptFormat::Google => GoogleTranscript::deserialize(value)
            .map_err(|e| ConvertError::malformed(format!("Google schema: {}", e)))?
            .segments()?,
    };

    debug!("Extracted {} segments", segments.len());

    Ok(ParsedTranscript { format, segments })
}
