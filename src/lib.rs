pub mod io;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use io::{read_timeline_file, read_transcript_file, timeline_to_json, write_timeline_file};
pub use models::{
    ConvertError, DiarizationSegment, DiarizationTimeline, ErrorCategory, RawSegment,
};
pub use pipeline::{Conversion, PipelineConfig, PipelineReport, convert_json, run_pipeline};
pub use stages::{
    NullSpeakerPolicy, OrderConfig, OrderingKey, ParseConfig, RoundConfig, TranscriptFormat,
    TrimConfig,
};
