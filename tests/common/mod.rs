//! Shared fixtures for integration tests.
//!
//! Builds small synthetic Matroska documents with the EBML writers from
//! `ts_probe::ebml::encode` and writes them to temp files.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;
use ts_probe::ebml::encode::{master_element, string_element, uint_element};
use ts_probe::ebml::ids;

pub const TRACK_TYPE_VIDEO: u64 = 1;
pub const TRACK_TYPE_AUDIO: u64 = 2;
pub const TRACK_TYPE_SUBTITLE: u64 = 17;

/// EBML header declaring a Matroska document.
pub fn ebml_header(doc_type: &str) -> Vec<u8> {
    master_element(
        ids::EBML,
        &[
            uint_element(0x4286, 1),
            string_element(0x4282, doc_type),
            uint_element(0x4287, 4),
            uint_element(0x4285, 2),
        ],
    )
}

/// Builder for a single TrackEntry.
#[derive(Debug, Default, Clone)]
pub struct Track {
    track_type: u64,
    name: Option<String>,
    language: Option<String>,
    language_ietf: Option<String>,
    codec: Option<String>,
}

impl Track {
    pub fn audio() -> Self {
        Self::of_type(TRACK_TYPE_AUDIO)
    }

    pub fn of_type(track_type: u64) -> Self {
        Self {
            track_type,
            ..Self::default()
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn language_ietf(mut self, language: &str) -> Self {
        self.language_ietf = Some(language.to_string());
        self
    }

    pub fn codec(mut self, codec: &str) -> Self {
        self.codec = Some(codec.to_string());
        self
    }

    pub fn encode(&self, number: u64) -> Vec<u8> {
        let mut children = vec![
            uint_element(0xD7, number),
            uint_element(ids::TRACK_TYPE, self.track_type),
        ];
        if let Some(ref name) = self.name {
            children.push(string_element(ids::NAME, name));
        }
        if let Some(ref language) = self.language {
            children.push(string_element(ids::LANGUAGE, language));
        }
        if let Some(ref language) = self.language_ietf {
            children.push(string_element(ids::LANGUAGE_IETF, language));
        }
        if let Some(ref codec) = self.codec {
            children.push(string_element(ids::CODEC_ID, codec));
        }
        master_element(ids::TRACK_ENTRY, &children)
    }
}

/// Tracks element wrapping the given entries, numbered from 1.
pub fn tracks_element(tracks: &[Track]) -> Vec<u8> {
    let entries: Vec<Vec<u8>> = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| t.encode(i as u64 + 1))
        .collect();
    master_element(ids::TRACKS, &entries)
}

/// A document with the given level-1 elements inside its Segment.
pub fn document(level1: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = ebml_header("matroska");
    buf.extend(master_element(ids::SEGMENT, level1));
    buf
}

/// A document whose Segment holds Info then Tracks.
pub fn document_with_tracks(tracks: &[Track]) -> Vec<u8> {
    let info = master_element(0x1549_A966, &[uint_element(0x2A_D7B1, 1_000_000)]);
    document(&[info, tracks_element(tracks)])
}

/// Write `bytes` to a temp file with the given extension.
pub fn write_media(bytes: &[u8], extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
