use thiserror::Error;

/// Coarse failure classes, one per process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Unreadable input, invalid JSON or unwritable output
    FatalInput,
    /// Neither vendor schema matched
    UnsupportedFormat,
    /// A vendor schema assumption was violated
    MalformedTranscript,
    /// Bad null-speaker mode, trim window or numeric setting
    InvalidConfiguration,
    /// Start times decrease between adjacent segments after ordering
    SortInvariantViolation,
}

impl ErrorCategory {
    /// Exit code reported by the CLI. Code 2 is left to clap's usage errors.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCategory::FatalInput => 1,
            ErrorCategory::UnsupportedFormat => 3,
            ErrorCategory::InvalidConfiguration => 4,
            ErrorCategory::MalformedTranscript => 5,
            ErrorCategory::SortInvariantViolation => 6,
        }
    }
}

/// Fatal errors raised while converting a transcript
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported transcript format (expected Azure `AudioFileResults` or Google `results`)")]
    UnsupportedFormat,

    #[error("Malformed transcript: {0}")]
    MalformedTranscript(String),

    #[error("Unknown null speaker mode {0:?} (expected ignore, previous or next)")]
    InvalidNullPolicy(String),

    #[error("Invalid trim window: start {start} must be before end {end}")]
    InvalidWindow { start: f64, end: f64 },

    #[error("Invalid precision {0}: at most 15 decimal places are supported")]
    InvalidPrecision(u32),

    #[error("Invalid tick divisor {0}: must be finite and positive")]
    InvalidTickDivisor(f64),

    #[error(
        "Segments out of order at index {index}: ({prev_start}, {prev_end}) precedes ({curr_start}, {curr_end})"
    )]
    SortInvariantViolation {
        index: usize,
        prev_start: f64,
        prev_end: f64,
        curr_start: f64,
        curr_end: f64,
    },
}

impl ConvertError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        ConvertError::MalformedTranscript(msg.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::Io { .. } | ConvertError::Json(_) => ErrorCategory::FatalInput,
            ConvertError::UnsupportedFormat => ErrorCategory::UnsupportedFormat,
            ConvertError::MalformedTranscript(_) => ErrorCategory::MalformedTranscript,
            ConvertError::InvalidNullPolicy(_)
            | ConvertError::InvalidWindow { .. }
            | ConvertError::InvalidPrecision(_)
            | ConvertError::InvalidTickDivisor(_) => ErrorCategory::InvalidConfiguration,
            ConvertError::SortInvariantViolation { .. } => ErrorCategory::SortInvariantViolation,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ErrorCategory::FatalInput.exit_code(),
            ErrorCategory::UnsupportedFormat.exit_code(),
            ErrorCategory::MalformedTranscript.exit_code(),
            ErrorCategory::InvalidConfiguration.exit_code(),
            ErrorCategory::SortInvariantViolation.exit_code(),
        ];

        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            // clap exits with 2 on usage errors
            assert_ne!(*a, 2);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_configuration_errors_share_category() {
        assert_eq!(
            ConvertError::InvalidNullPolicy("x".into()).category(),
            ErrorCategory::InvalidConfiguration
        );
        assert_eq!(
            ConvertError::InvalidWindow { start: 3.0, end: 1.0 }.category(),
            ErrorCategory::InvalidConfiguration
        );
    }
}
