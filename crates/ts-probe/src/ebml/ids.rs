//! Element IDs needed to reach audio TrackEntry fields.
//!
//! IDs are stored with their VINT marker bits, exactly as they appear on disk.

/// EBML header; also the file signature.
pub const EBML: u32 = 0x1A45_DFA3;
/// Segment, the single top-level container of a Matroska file.
pub const SEGMENT: u32 = 0x1853_8067;

// Level-1 children of Segment.
pub const TRACKS: u32 = 0x1654_AE6B;
pub const CLUSTER: u32 = 0x1F43_B675;
pub const CUES: u32 = 0x1C53_BB6B;
pub const TAGS: u32 = 0x1941_A469;

/// One track definition inside Tracks.
pub const TRACK_ENTRY: u32 = 0xAE;

// TrackEntry children.
pub const TRACK_TYPE: u32 = 0x83;
pub const CODEC_ID: u32 = 0x86;
pub const NAME: u32 = 0x536E;
pub const LANGUAGE: u32 = 0x22_B59C;
pub const LANGUAGE_IETF: u32 = 0x22_B59D;

/// The four signature bytes every EBML document starts with.
pub const EBML_MAGIC: [u8; 4] = EBML.to_be_bytes();

/// Level-1 elements that mark the start of media data. Tracks is written
/// before the first of these, so reaching one ends the search.
pub const MEDIA_DATA: [u32; 3] = [CLUSTER, CUES, TAGS];
