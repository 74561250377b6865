use std::path::Path;

use crate::models::{ConvertError, DiarizationTimeline};

/// Serialize a timeline as a JSON array of `[speaker, start, end]` triples
pub fn timeline_to_json(timeline: &DiarizationTimeline, pretty: bool) -> Result<String, ConvertError> {
    let json = if pretty {
        serde_json::to_string_pretty(timeline)?
    } else {
        serde_json::to_string(timeline)?
    };
    Ok(json)
}

/// Write a timeline to `path`.
///
/// The JSON is fully rendered before the file is created, so a failure never
/// leaves a truncated file behind.
pub fn write_timeline_file(
    path: &Path,
    timeline: &DiarizationTimeline,
    pretty: bool,
) -> Result<(), ConvertError> {
    let json = timeline_to_json(timeline, pretty)?;
    std::fs::write(path, json).map_err(|source| ConvertError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load a canonical diarization file, such as a scoring reference
pub fn read_timeline_file(path: &Path) -> Result<DiarizationTimeline, ConvertError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiarizationSegment;

    fn timeline() -> DiarizationTimeline {
        DiarizationTimeline::new(vec![
            DiarizationSegment::new("A", 0.0, 1.0),
            DiarizationSegment::new("B", 1.0, 1.5),
        ])
    }

    #[test]
    fn test_write_and_read_timeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diar.json");

        write_timeline_file(&path, &timeline(), false).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, r#"[["A",0.0,1.0],["B",1.0,1.5]]"#);
        assert_eq!(read_timeline_file(&path).unwrap(), timeline());
    }

    #[test]
    fn test_pretty_output_keeps_shape() {
        let json = timeline_to_json(&timeline(), true).unwrap();

        assert!(json.contains('\n'));
        let parsed: DiarizationTimeline = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, timeline());
    }

    #[test]
    fn test_empty_timeline() {
        assert_eq!(timeline_to_json(&DiarizationTimeline::default(), false).unwrap(), "[]");
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("diar.json");

        let err = write_timeline_file(&path, &timeline(), false).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }
}
