//! The [`TrackLister`] trait defining the interface for audio-track listing.

use std::path::Path;

use ts_core::AudioTrackDescriptor;

/// Result of one listing strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    /// The strategy found audio tracks.
    Found(Vec<AudioTrackDescriptor>),
    /// The strategy could not tell (wrong format, unparseable structure).
    NotApplicable,
    /// The strategy read the track list and it has no audio tracks.
    Absent,
}

impl ListOutcome {
    /// Wrap a track list, mapping an empty list to [`ListOutcome::Absent`].
    pub fn from_tracks(tracks: Vec<AudioTrackDescriptor>) -> Self {
        if tracks.is_empty() {
            ListOutcome::Absent
        } else {
            ListOutcome::Found(tracks)
        }
    }

    /// The found tracks, or an empty list for the other outcomes.
    pub fn into_tracks(self) -> Vec<AudioTrackDescriptor> {
        match self {
            ListOutcome::Found(tracks) => tracks,
            ListOutcome::NotApplicable | ListOutcome::Absent => Vec::new(),
        }
    }
}

/// A strategy for listing the audio tracks of a media file.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
pub trait TrackLister: Send + Sync {
    /// Human-readable name identifying this strategy.
    fn name(&self) -> &'static str;

    /// Check whether this strategy applies to the given path.
    ///
    /// A return value of `true` does not guarantee that
    /// [`TrackLister::list`] will find anything.
    fn supports(&self, path: &Path) -> bool;

    /// List the audio tracks of the file at `path`.
    ///
    /// `Err` means the strategy could not run (missing tool, I/O failure);
    /// callers treat it like [`ListOutcome::NotApplicable`].
    fn list(&self, path: &Path) -> ts_core::Result<ListOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(index: u32) -> AudioTrackDescriptor {
        AudioTrackDescriptor {
            index,
            label: format!("Track {}", index + 1),
            language: String::new(),
            codec: String::new(),
        }
    }

    #[test]
    fn empty_list_is_absent() {
        assert_eq!(ListOutcome::from_tracks(vec![]), ListOutcome::Absent);
        assert!(ListOutcome::Found(vec![]).into_tracks().is_empty());
    }

    #[test]
    fn found_round_trips_tracks() {
        let outcome = ListOutcome::from_tracks(vec![track(0), track(1)]);
        assert!(matches!(outcome, ListOutcome::Found(ref tracks) if tracks.len() == 2));
        assert_eq!(outcome.into_tracks().len(), 2);
        assert!(ListOutcome::NotApplicable.into_tracks().is_empty());
    }
}
