//! Listing backends that shell out to external tools.
//!
//! [`FfprobeLister`] implements [`ts_probe::TrackLister`], so it can be put
//! ahead of the built-in parser in a [`ts_probe::CompositeLister`].

pub mod ffprobe;

pub use self::ffprobe::FfprobeLister;
