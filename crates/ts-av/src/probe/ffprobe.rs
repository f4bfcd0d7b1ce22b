//! FFprobe-based [`ts_probe::TrackLister`] implementation.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_streams
//! -select_streams a` and maps the audio streams into descriptors.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tokio::runtime::RuntimeFlavor;
use ts_core::{format_label, AudioTrackDescriptor};
use ts_probe::{ListOutcome, TrackLister};

use crate::command::ToolCommand;
use crate::tools::ToolConfig;

/// A lister backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeLister {
    /// Path to the ffprobe binary.
    ffprobe_path: PathBuf,
    /// Time budget for one run.
    timeout: Duration,
}

impl FfprobeLister {
    /// Create a new lister using the given ffprobe path.
    pub fn new(ffprobe_path: PathBuf, timeout: Duration) -> Self {
        Self {
            ffprobe_path,
            timeout,
        }
    }

    /// Create a lister from a discovered tool.
    pub fn from_tool(tool: &ToolConfig) -> Self {
        Self::new(tool.path.clone(), tool.timeout)
    }
}

impl TrackLister for FfprobeLister {
    fn name(&self) -> &'static str {
        "ffprobe"
    }

    fn supports(&self, path: &Path) -> bool {
        // ffprobe understands basically every media container.
        path.extension().is_some()
    }

    fn list(&self, path: &Path) -> ts_core::Result<ListOutcome> {
        // The trait is sync but ToolCommand is async.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.list_async(path)))
            }
            // block_in_place panics on a current-thread runtime, and block_on
            // cannot nest on this thread, so run on a separate one.
            Ok(_) => std::thread::scope(|s| {
                s.spawn(|| self.list_on_own_runtime(path))
                    .join()
                    .unwrap_or_else(|_| {
                        Err(ts_core::Error::tool("ffprobe", "listing thread panicked"))
                    })
            }),
            Err(_) => self.list_on_own_runtime(path),
        }
    }
}

impl FfprobeLister {
    fn list_on_own_runtime(&self, path: &Path) -> ts_core::Result<ListOutcome> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                ts_core::Error::tool("ffprobe", format!("failed to create tokio runtime: {e}"))
            })?;
        rt.block_on(self.list_async(path))
    }

    async fn list_async(&self, path: &Path) -> ts_core::Result<ListOutcome> {
        let mut cmd = ToolCommand::new(self.ffprobe_path.clone());
        cmd.args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
            "-select_streams",
            "a",
        ])
        .arg(path.to_string_lossy().as_ref())
        .timeout(self.timeout);

        let output = cmd.execute().await?;
        let tracks = parse_ffprobe_output(&output.stdout)?;
        Ok(ListOutcome::from_tracks(tracks))
    }
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    title: Option<String>,
    language: Option<String>,
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Map ffprobe JSON to descriptors, numbering audio streams from zero in
/// output order.
fn parse_ffprobe_output(json: &str) -> ts_core::Result<Vec<AudioTrackDescriptor>> {
    let output: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| ts_core::Error::Probe(format!("ffprobe JSON parse error: {e}")))?;

    let tracks = output
        .streams
        .into_iter()
        .filter(|s| s.codec_type.as_deref() == Some("audio"))
        .enumerate()
        .map(|(i, stream)| {
            let index = u32::try_from(i).unwrap_or(u32::MAX);
            let name = stream.tags.title.unwrap_or_default();
            let language = stream.tags.language.unwrap_or_default();
            let codec = stream.codec_name.unwrap_or_default();
            AudioTrackDescriptor {
                index,
                label: format_label(index, &name, &language, &codec.to_uppercase()),
                language,
                codec,
            }
        })
        .collect();

    Ok(tracks)
}
