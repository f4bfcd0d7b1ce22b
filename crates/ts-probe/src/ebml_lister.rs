//! Built-in [`TrackLister`] backed by the Matroska prefix scanner.
//!
//! Needs no external tools, which makes it the last resort of the chain.

use std::path::Path;

use crate::lister::{ListOutcome, TrackLister};
use crate::matroska::{self, ScanError, ScanLimits};

/// File extensions routed to the scanner.
const EXTENSIONS: &[&str] = &["mkv", "webm", "mka"];

/// A pure-Rust [`TrackLister`] for Matroska and WebM files.
#[derive(Debug, Clone, Default)]
pub struct EbmlLister {
    limits: ScanLimits,
}

impl EbmlLister {
    /// Create a lister with the built-in prefix and skip limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lister with tuned limits.
    pub fn with_limits(limits: ScanLimits) -> Self {
        Self { limits }
    }
}

impl TrackLister for EbmlLister {
    fn name(&self) -> &'static str {
        "ebml"
    }

    fn supports(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => EXTENSIONS.contains(&ext.to_lowercase().as_str()),
            None => false,
        }
    }

    fn list(&self, path: &Path) -> ts_core::Result<ListOutcome> {
        match matroska::scan_file(path, &self.limits) {
            Ok(tracks) => Ok(ListOutcome::from_tracks(tracks)),
            Err(ScanError::Unreadable(source)) => Err(ts_core::Error::Io { source }),
            Err(ScanError::TracksNotFound) => {
                tracing::debug!(path = %path.display(), "Tracks not found in prefix");
                Ok(ListOutcome::Absent)
            }
            Err(e @ (ScanError::NotEbml | ScanError::MissingSegment)) => {
                tracing::debug!(path = %path.display(), reason = %e, "not a parseable Matroska file");
                Ok(ListOutcome::NotApplicable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebml::encode::{master_element, string_element, uint_element};
    use crate::ebml::ids;

    fn write_mka(dir: &Path, name: &str, entries: &[Vec<u8>]) -> std::path::PathBuf {
        let mut buf = master_element(ids::EBML, &[string_element(0x4282, "webm")]);
        buf.extend(master_element(
            ids::SEGMENT,
            &[master_element(ids::TRACKS, entries)],
        ));
        let path = dir.join(name);
        std::fs::write(&path, buf).unwrap();
        path
    }

    #[test]
    fn supports_matroska_extensions_only() {
        let lister = EbmlLister::new();
        assert!(lister.supports(Path::new("a.mkv")));
        assert!(lister.supports(Path::new("a.MKA")));
        assert!(lister.supports(Path::new("/x/y/a.webm")));
        assert!(!lister.supports(Path::new("a.mp4")));
        assert!(!lister.supports(Path::new("mkv")));
    }

    #[test]
    fn found_and_absent() {
        let dir = tempfile::tempdir().unwrap();
        let audio = master_element(
            ids::TRACK_ENTRY,
            &[
                uint_element(ids::TRACK_TYPE, 2),
                string_element(ids::CODEC_ID, "A_VORBIS"),
            ],
        );
        let video = master_element(ids::TRACK_ENTRY, &[uint_element(ids::TRACK_TYPE, 1)]);

        let lister = EbmlLister::new();
        let with_audio = write_mka(dir.path(), "a.webm", &[video.clone(), audio]);
        match lister.list(&with_audio).unwrap() {
            ListOutcome::Found(tracks) => assert_eq!(tracks[0].label, "Track 1 — VORBIS"),
            other => panic!("expected tracks, got {other:?}"),
        }

        let video_only = write_mka(dir.path(), "b.webm", &[video]);
        assert_eq!(lister.list(&video_only).unwrap(), ListOutcome::Absent);
    }

    #[test]
    fn non_matroska_is_not_applicable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.mkv");
        std::fs::write(&path, b"not a matroska file").unwrap();
        assert_eq!(
            EbmlLister::new().list(&path).unwrap(),
            ListOutcome::NotApplicable
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EbmlLister::new()
            .list(Path::new("/nonexistent/file.mkv"))
            .unwrap_err();
        assert!(err.is_unavailable());
    }
}
