//! A composite lister that delegates to multiple [`TrackLister`] implementations.

use std::path::Path;

use ts_core::AudioTrackDescriptor;

use crate::lister::{ListOutcome, TrackLister};

/// Tries each registered [`TrackLister`] in order and returns the first
/// non-empty track list.
///
/// This layers strategies without hard-coding their order anywhere, e.g. an
/// external demuxer first with the built-in Matroska parser as fallback.
pub struct CompositeLister {
    listers: Vec<Box<dyn TrackLister>>,
}

impl CompositeLister {
    /// Create a new `CompositeLister` from an ordered list of strategies.
    pub fn new(listers: Vec<Box<dyn TrackLister>>) -> Self {
        Self { listers }
    }

    /// Names of the registered strategies, in the order they are tried.
    pub fn names(&self) -> Vec<&'static str> {
        self.listers.iter().map(|l| l.name()).collect()
    }

    /// Run the chain and flatten the outcome; empty means "no tracks found".
    pub fn tracks(&self, path: &Path) -> Vec<AudioTrackDescriptor> {
        self.run(path).into_tracks()
    }

    fn run(&self, path: &Path) -> ListOutcome {
        let mut outcome = ListOutcome::NotApplicable;

        for lister in &self.listers {
            if !lister.supports(path) {
                tracing::trace!(lister = lister.name(), path = %path.display(), "not supported");
                continue;
            }

            match lister.list(path) {
                Ok(ListOutcome::Found(tracks)) if !tracks.is_empty() => {
                    tracing::debug!(
                        lister = lister.name(),
                        count = tracks.len(),
                        "audio tracks found"
                    );
                    return ListOutcome::Found(tracks);
                }
                Ok(ListOutcome::Found(_)) | Ok(ListOutcome::Absent) => {
                    tracing::debug!(lister = lister.name(), "no audio tracks, trying next");
                    outcome = ListOutcome::Absent;
                }
                Ok(ListOutcome::NotApplicable) => {
                    tracing::debug!(lister = lister.name(), "not applicable, trying next");
                }
                Err(e) if e.is_unavailable() => {
                    tracing::debug!(lister = lister.name(), error = %e, "lister unavailable, trying next");
                }
                Err(e) => {
                    tracing::warn!(lister = lister.name(), error = %e, "lister failed, trying next");
                }
            }
        }

        outcome
    }
}

impl TrackLister for CompositeLister {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn supports(&self, path: &Path) -> bool {
        self.listers.iter().any(|l| l.supports(path))
    }

    fn list(&self, path: &Path) -> ts_core::Result<ListOutcome> {
        Ok(self.run(path))
    }
}
