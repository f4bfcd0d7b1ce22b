//! Audio-track descriptors handed to the caller.

use serde::{Deserialize, Serialize};

/// Separator placed between the parts of a track label.
const LABEL_SEPARATOR: &str = " — ";

/// Language code Matroska and ffprobe use for "undetermined".
const UNDETERMINED_LANGUAGE: &str = "und";

/// One selectable audio track.
///
/// `index` is a dense, zero-based counter over audio tracks only, in the order
/// they appear in the file. Callers treat it as an opaque selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTrackDescriptor {
    /// Zero-based position among the file's audio tracks.
    pub index: u32,
    /// Display label, e.g. `Commentary — ENG — AC3`.
    pub label: String,
    /// Raw language code, or empty.
    pub language: String,
    /// Raw codec identifier, or empty.
    pub codec: String,
}

/// Build the display label for an audio track.
///
/// Joins the track name and the uppercased language (skipped when empty or
/// `und`), falls back to `Track <index + 1>` when both are missing, then
/// appends `codec_display` when non-empty.
pub fn format_label(index: u32, name: &str, language: &str, codec_display: &str) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);

    if !name.is_empty() {
        parts.push(name.to_string());
    }
    if !language.is_empty() && !language.eq_ignore_ascii_case(UNDETERMINED_LANGUAGE) {
        parts.push(language.to_uppercase());
    }
    if parts.is_empty() {
        parts.push(format!("Track {}", index + 1));
    }
    if !codec_display.is_empty() {
        parts.push(codec_display.to_string());
    }

    parts.join(LABEL_SEPARATOR)
}
