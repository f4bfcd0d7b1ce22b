//! Audio-track extraction from the head of a Matroska/WebM file.
//!
//! Only a bounded prefix of the file is read. The EBML header and the Tracks
//! element sit ahead of the media clusters in any well-formed file, so the
//! prefix is enough to list tracks without touching the rest of the file.
//!
//! Every malformed-input path ends in [`ScanError`] internally and in an
//! empty list at the public entry points: listing tracks is an enrichment,
//! never a reason to fail.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ts_core::{format_label, AudioTrackDescriptor};

use crate::ebml::{ids, ElementCursor};

/// Bytes loaded from the start of the file.
pub const PREFIX_LEN: usize = 5 * 1024 * 1024;

/// Largest level-1 element skipped while looking for Tracks.
pub const MAX_SKIPPABLE_LEN: u64 = 10 * 1024 * 1024;

/// TrackType value for audio.
const TRACK_TYPE_AUDIO: u64 = 2;

/// Codec ID prefix shared by all Matroska audio codecs.
const AUDIO_CODEC_PREFIX: &str = "A_";

/// Bounds applied to a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    /// Bytes of the file considered.
    pub prefix_len: usize,
    /// Level-1 elements declaring more than this end the Tracks search.
    pub max_skip_len: u64,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            prefix_len: PREFIX_LEN,
            max_skip_len: MAX_SKIPPABLE_LEN,
        }
    }
}

/// Why a scan produced no tracks.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot open file: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("missing EBML signature")]
    NotEbml,

    #[error("no Segment after the EBML header")]
    MissingSegment,

    #[error("no Tracks element before media data or the end of the prefix")]
    TracksNotFound,
}

/// Fields gathered from one TrackEntry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct TrackEntryRecord {
    track_type: u64,
    name: String,
    language: String,
    codec_id: String,
}

impl TrackEntryRecord {
    fn is_audio(&self) -> bool {
        self.track_type == TRACK_TYPE_AUDIO
    }

    fn into_descriptor(self, index: u32) -> AudioTrackDescriptor {
        let codec_display = self
            .codec_id
            .strip_prefix(AUDIO_CODEC_PREFIX)
            .unwrap_or(&self.codec_id);
        let label = format_label(index, &self.name, &self.language, codec_display);

        AudioTrackDescriptor {
            index,
            label,
            language: self.language,
            codec: self.codec_id,
        }
    }
}

/// Read up to `limit` bytes from the start of `path`.
///
/// Only a failure to open is an error. A read error part-way through keeps
/// whatever was read before it. The handle is closed before this returns.
pub fn load_prefix(path: &Path, limit: usize) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut buf = Vec::new();

    if let Err(e) = file.take(limit as u64).read_to_end(&mut buf) {
        tracing::debug!(
            path = %path.display(),
            bytes = buf.len(),
            error = %e,
            "read error, scanning the bytes already loaded"
        );
    }

    Ok(buf)
}

/// List audio tracks in `path` with the default limits.
///
/// Returns an empty list when the file is unreadable, not Matroska, or
/// has no audio tracks inside the prefix.
pub fn list_audio_tracks(path: &Path) -> Vec<AudioTrackDescriptor> {
    list_audio_tracks_with(path, &ScanLimits::default())
}

/// [`list_audio_tracks`] with explicit limits.
pub fn list_audio_tracks_with(path: &Path, limits: &ScanLimits) -> Vec<AudioTrackDescriptor> {
    match scan_file(path, limits) {
        Ok(tracks) => tracks,
        Err(e) => {
            tracing::debug!(path = %path.display(), reason = %e, "no audio tracks listed");
            Vec::new()
        }
    }
}

/// List audio tracks in an in-memory prefix with the default limits.
pub fn parse_audio_tracks(buf: &[u8]) -> Vec<AudioTrackDescriptor> {
    scan(buf, &ScanLimits::default()).unwrap_or_else(|e| {
        tracing::debug!(reason = %e, "no audio tracks listed");
        Vec::new()
    })
}

/// Load the prefix of `path` and scan it.
pub fn scan_file(path: &Path, limits: &ScanLimits) -> Result<Vec<AudioTrackDescriptor>, ScanError> {
    let buf = load_prefix(path, limits.prefix_len)?;
    scan(&buf, limits)
}

/// Scan a prefix buffer for audio TrackEntry elements.
///
/// Bytes beyond `limits.prefix_len` are ignored.
pub fn scan(buf: &[u8], limits: &ScanLimits) -> Result<Vec<AudioTrackDescriptor>, ScanError> {
    let buf = &buf[..buf.len().min(limits.prefix_len)];

    if !buf.starts_with(&ids::EBML_MAGIC) {
        return Err(ScanError::NotEbml);
    }

    let tracks = find_tracks(buf, limits)?;
    Ok(collect_audio_tracks(tracks))
}

/// Walk EBML header → Segment → level-1 siblings and return a cursor over
/// the Tracks payload.
fn find_tracks<'a>(buf: &'a [u8], limits: &ScanLimits) -> Result<ElementCursor<'a>, ScanError> {
    let mut top = ElementCursor::new(buf);

    // The signature check guarantees the first element is the EBML header.
    top.next().ok_or(ScanError::MissingSegment)?;

    let segment = top
        .next()
        .filter(|h| h.id == ids::SEGMENT)
        .ok_or(ScanError::MissingSegment)?;

    // An unknown-size Segment saturates and is clamped to the prefix here.
    let mut level1 = top.children(&segment);

    while let Some(element) = level1.next() {
        if element.id == ids::TRACKS {
            tracing::trace!(offset = element.start, size = element.size, "found Tracks");
            return Ok(level1.children(&element));
        }

        if ids::MEDIA_DATA.contains(&element.id)
            || element.size == 0
            || element.size > limits.max_skip_len
        {
            tracing::trace!(
                id = format_args!("{:#X}", element.id),
                offset = element.start,
                size = element.size,
                "reached media data before Tracks"
            );
            return Err(ScanError::TracksNotFound);
        }
    }

    Err(ScanError::TracksNotFound)
}

/// Convert every audio TrackEntry under `tracks` into a descriptor, in
/// document order.
fn collect_audio_tracks(mut tracks: ElementCursor<'_>) -> Vec<AudioTrackDescriptor> {
    let mut audio = Vec::new();

    while let Some(element) = tracks.next() {
        if element.id != ids::TRACK_ENTRY {
            continue;
        }

        let Some(record) = read_track_entry(tracks.children(&element)) else {
            tracing::debug!(offset = element.start, "skipping truncated TrackEntry");
            continue;
        };

        if !record.is_audio() {
            continue;
        }

        let index = u32::try_from(audio.len()).unwrap_or(u32::MAX);
        audio.push(record.into_descriptor(index));
    }

    audio
}

/// Gather the fields of one TrackEntry. `None` if any child runs past the
/// entry's end or the entry ends inside a child header.
fn read_track_entry(mut children: ElementCursor<'_>) -> Option<TrackEntryRecord> {
    let end = children.end();
    let mut record = TrackEntryRecord::default();

    while let Some(child) = children.next() {
        if child.end() > end {
            return None;
        }

        let payload = children.payload(&child);
        match child.id {
            ids::TRACK_TYPE => record.track_type = read_uint(payload),
            ids::NAME => record.name = read_string(payload),
            ids::LANGUAGE | ids::LANGUAGE_IETF => record.language = read_string(payload),
            ids::CODEC_ID => record.codec_id = read_string(payload),
            _ => {}
        }
    }

    children.is_exhausted().then_some(record)
}

/// Big-endian unsigned integer; only the first eight bytes count.
fn read_uint(payload: &[u8]) -> u64 {
    payload
        .iter()
        .take(8)
        .fold(0_u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// UTF-8 text with any trailing NUL padding removed.
fn read_string(payload: &[u8]) -> String {
    String::from_utf8_lossy(payload)
        .trim_end_matches('\0')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebml::encode::{
        element, encode_id, encode_vint, master_element, string_element, uint_element,
    };

    fn ebml_header() -> Vec<u8> {
        master_element(
            ids::EBML,
            &[string_element(0x4282, "matroska"), uint_element(0x4287, 4)],
        )
    }

    fn track_entry(track_type: u64, name: &str, language: &str, codec: &str) -> Vec<u8> {
        let mut children = vec![uint_element(0xD7, 1), uint_element(ids::TRACK_TYPE, track_type)];
        if !name.is_empty() {
            children.push(string_element(ids::NAME, name));
        }
        if !language.is_empty() {
            children.push(string_element(ids::LANGUAGE, language));
        }
        if !codec.is_empty() {
            children.push(string_element(ids::CODEC_ID, codec));
        }
        master_element(ids::TRACK_ENTRY, &children)
    }

    fn file_with(level1: &[Vec<u8>]) -> Vec<u8> {
        let mut buf = ebml_header();
        buf.extend(master_element(ids::SEGMENT, level1));
        buf
    }

    fn file_with_tracks(entries: &[Vec<u8>]) -> Vec<u8> {
        file_with(&[master_element(ids::TRACKS, entries)])
    }

    #[test]
    fn non_ebml_input_is_empty() {
        assert!(parse_audio_tracks(b"RIFF\0\0\0\0WAVE").is_empty());
        assert!(parse_audio_tracks(&[]).is_empty());
        assert!(parse_audio_tracks(&[0x1A, 0x45, 0xDF]).is_empty());
        assert!(matches!(
            scan(b"\0\0\0\x18ftypisom", &ScanLimits::default()),
            Err(ScanError::NotEbml)
        ));
    }

    #[test]
    fn bare_signature_is_empty() {
        let result = scan(&ids::EBML_MAGIC, &ScanLimits::default());
        assert!(matches!(result, Err(ScanError::MissingSegment)));
        assert!(parse_audio_tracks(&ids::EBML_MAGIC).is_empty());
    }

    #[test]
    fn only_audio_entries_are_listed() {
        for entries in [
            vec![track_entry(1, "", "", "V_VP9"), track_entry(2, "", "", "A_OPUS")],
            vec![track_entry(2, "", "", "A_OPUS"), track_entry(1, "", "", "V_VP9")],
        ] {
            let tracks = parse_audio_tracks(&file_with_tracks(&entries));
            assert_eq!(tracks.len(), 1);
            assert_eq!(tracks[0].index, 0);
            assert_eq!(tracks[0].codec, "A_OPUS");
        }
    }

    #[test]
    fn labels_follow_name_language_codec() {
        let buf = file_with_tracks(&[
            track_entry(2, "Commentary", "eng", "A_AC3"),
            track_entry(1, "", "", "V_MPEG4/ISO/AVC"),
            track_entry(2, "", "und", "A_OPUS"),
        ]);
        let tracks = parse_audio_tracks(&buf);
        assert_eq!(
            tracks,
            vec![
                AudioTrackDescriptor {
                    index: 0,
                    label: "Commentary — ENG — AC3".into(),
                    language: "eng".into(),
                    codec: "A_AC3".into(),
                },
                AudioTrackDescriptor {
                    index: 1,
                    label: "Track 2 — OPUS".into(),
                    language: "und".into(),
                    codec: "A_OPUS".into(),
                },
            ]
        );
    }

    #[test]
    fn codec_without_audio_prefix_is_untouched() {
        let buf = file_with_tracks(&[track_entry(2, "", "", "OPUS_RAW")]);
        let tracks = parse_audio_tracks(&buf);
        assert_eq!(tracks[0].codec, "OPUS_RAW");
        assert_eq!(tracks[0].label, "Track 1 — OPUS_RAW");
    }

    #[test]
    fn ietf_language_is_read() {
        let entry = master_element(
            ids::TRACK_ENTRY,
            &[
                uint_element(ids::TRACK_TYPE, 2),
                string_element(ids::LANGUAGE_IETF, "pt-BR"),
            ],
        );
        let tracks = parse_audio_tracks(&file_with_tracks(&[entry]));
        assert_eq!(tracks[0].language, "pt-BR");
        assert_eq!(tracks[0].label, "PT-BR");
    }

    #[test]
    fn nul_padded_strings_are_trimmed() {
        let entry = master_element(
            ids::TRACK_ENTRY,
            &[
                uint_element(ids::TRACK_TYPE, 2),
                element(ids::CODEC_ID, b"A_AAC\0\0\0"),
            ],
        );
        let tracks = parse_audio_tracks(&file_with_tracks(&[entry]));
        assert_eq!(tracks[0].codec, "A_AAC");
    }

    #[test]
    fn level1_elements_before_tracks_are_skipped() {
        let info = master_element(0x1549_A966, &[uint_element(0x2AD7B1, 1_000_000)]);
        let seek_head = element(0x114D_9B74, &[0xEC, 0x80]);
        let tracks = master_element(ids::TRACKS, &[track_entry(2, "Main", "fre", "A_EAC3")]);
        let tracks = parse_audio_tracks(&file_with(&[seek_head, info, tracks]));
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].label, "Main — FRE — EAC3");
    }

    #[test]
    fn cluster_before_tracks_ends_search() {
        let cluster = master_element(ids::CLUSTER, &[uint_element(0xE7, 0)]);
        let tracks = master_element(ids::TRACKS, &[track_entry(2, "", "", "A_AAC")]);
        let result = scan(&file_with(&[cluster, tracks]), &ScanLimits::default());
        assert!(matches!(result, Err(ScanError::TracksNotFound)));
    }

    #[test]
    fn zero_size_element_before_tracks_ends_search() {
        let void = element(0xEC, &[]);
        let tracks = master_element(ids::TRACKS, &[track_entry(2, "", "", "A_AAC")]);
        let result = scan(&file_with(&[void, tracks]), &ScanLimits::default());
        assert!(matches!(result, Err(ScanError::TracksNotFound)));
    }

    #[test]
    fn oversized_element_before_tracks_ends_search() {
        let limits = ScanLimits {
            prefix_len: PREFIX_LEN,
            max_skip_len: 4,
        };
        let info = element(0x1549_A966, &[0; 16]);
        let tracks = master_element(ids::TRACKS, &[track_entry(2, "", "", "A_AAC")]);
        let result = scan(&file_with(&[info, tracks]), &limits);
        assert!(matches!(result, Err(ScanError::TracksNotFound)));
    }

    #[test]
    fn missing_segment_is_empty() {
        let mut buf = ebml_header();
        buf.extend(master_element(ids::TRACKS, &[track_entry(2, "", "", "A_AAC")]));
        assert!(matches!(
            scan(&buf, &ScanLimits::default()),
            Err(ScanError::MissingSegment)
        ));
    }

    #[test]
    fn unknown_size_segment_is_clamped_to_prefix() {
        let mut buf = ebml_header();
        buf.extend(encode_id(ids::SEGMENT));
        buf.extend_from_slice(&[0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        buf.extend(master_element(ids::TRACKS, &[track_entry(2, "", "ger", "A_DTS")]));
        let tracks = parse_audio_tracks(&buf);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].label, "GER — DTS");
    }

    #[test]
    fn tracks_overrunning_prefix_is_clamped() {
        let entries = [
            track_entry(2, "First", "", "A_AAC"),
            track_entry(2, "Second", "", "A_AC3"),
        ]
        .concat();

        let mut tracks = encode_id(ids::TRACKS);
        tracks.extend(encode_vint(1 << 20).unwrap());
        tracks.extend(&entries);

        let buf = file_with(&[tracks]);
        let result = parse_audio_tracks(&buf);
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].label, "Second — AC3");
    }

    #[test]
    fn truncated_entry_is_skipped_without_losing_earlier_tracks() {
        let good = track_entry(2, "Good", "", "A_AAC");
        let mut bad_entry_payload = uint_element(ids::TRACK_TYPE, 2);
        // Name claims 50 bytes but only three follow inside the entry.
        bad_entry_payload.extend(encode_id(ids::NAME));
        bad_entry_payload.extend(encode_vint(50).unwrap());
        bad_entry_payload.extend_from_slice(b"abc");
        let bad = element(ids::TRACK_ENTRY, &bad_entry_payload);
        let after = track_entry(2, "After", "", "A_FLAC");

        let tracks = parse_audio_tracks(&file_with_tracks(&[good, bad, after]));
        let labels: Vec<&str> = tracks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Good — AAC", "After — FLAC"]);
        assert_eq!(tracks[1].index, 1);
    }

    #[test]
    fn entry_cut_by_prefix_is_skipped() {
        let buf = file_with_tracks(&[
            track_entry(2, "Kept", "", "A_AAC"),
            track_entry(2, "Cut", "", "A_VORBIS"),
        ]);
        let limits = ScanLimits {
            prefix_len: buf.len() - 3,
            max_skip_len: MAX_SKIPPABLE_LEN,
        };
        let tracks = scan(&buf, &limits).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].label, "Kept — AAC");
    }

    #[test]
    fn tracks_without_audio_is_ok_and_empty() {
        let buf = file_with_tracks(&[
            track_entry(1, "", "", "V_AV1"),
            track_entry(17, "", "", "S_TEXT/UTF8"),
        ]);
        assert!(scan(&buf, &ScanLimits::default()).unwrap().is_empty());
    }

    #[test]
    fn uint_reads_big_endian() {
        assert_eq!(read_uint(&[]), 0);
        assert_eq!(read_uint(&[0x02]), 2);
        assert_eq!(read_uint(&[0x01, 0x00]), 256);
    }

    #[test]
    fn load_prefix_respects_limit_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mka");
        std::fs::write(&path, vec![7_u8; 64]).unwrap();

        assert_eq!(load_prefix(&path, 16).unwrap().len(), 16);
        assert_eq!(load_prefix(&path, 1024).unwrap().len(), 64);
        assert!(load_prefix(&dir.path().join("missing.mkv"), 16).is_err());
        assert!(list_audio_tracks(&dir.path().join("missing.mkv")).is_empty());
    }
}
