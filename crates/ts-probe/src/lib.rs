//! # ts-probe
//!
//! Lists the audio tracks of Matroska, WebM and Matroska-audio files without
//! an external demuxer.
//!
//! Only a bounded prefix of the file is read, and every malformed input
//! degrades to "no tracks" instead of an error. The [`TrackLister`] trait and
//! [`CompositeLister`] let callers put this parser behind faster or richer
//! strategies (such as ffprobe) and fall back to it when those are missing.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::path::Path;
//!
//! let tracks = ts_probe::list_audio_tracks(Path::new("movie.mkv"));
//! for track in &tracks {
//!     println!("{}: {}", track.index, track.label);
//! }
//! ```

pub mod composite;
pub mod ebml;
pub mod ebml_lister;
pub mod lister;
pub mod matroska;

// Re-export key types at crate root for convenience.
pub use composite::CompositeLister;
pub use ebml_lister::EbmlLister;
pub use lister::{ListOutcome, TrackLister};
pub use matroska::{list_audio_tracks, parse_audio_tracks, ScanError, ScanLimits};
pub use ts_core::AudioTrackDescriptor;
