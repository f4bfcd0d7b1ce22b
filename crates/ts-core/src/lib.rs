//! ts-core: shared error type, configuration, and audio-track descriptors.
//!
//! This crate is the foundational dependency for the other ts-* crates. Every
//! track lister, whether it parses bytes itself or shells out to a demuxer,
//! produces the same [`AudioTrackDescriptor`] and funnels its failures into
//! the same [`Error`].

pub mod config;
pub mod error;
pub mod track;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use track::{format_label, AudioTrackDescriptor};
