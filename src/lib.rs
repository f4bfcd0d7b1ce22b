//! trackscan - list the audio tracks of Matroska/WebM files
//!
//! This library crate exposes config loading and strategy-chain assembly for
//! the binary and for integration testing.

pub mod config;
pub mod listing;
