//! Application configuration types.
//!
//! The top-level [`Config`] carries the scan and tool sections. Every section
//! defaults sensibly so an empty document is valid; the root crate decides
//! how the document is found and parsed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default time budget for an external tool invocation, in seconds.
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 10;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub tools: ToolsConfig,
}

impl Config {
    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.scan.prefix_bytes == Some(0) {
            warnings.push("scan.prefix_bytes is 0; no Matroska file can be parsed".into());
        }

        if let (Some(prefix), Some(skip)) = (self.scan.prefix_bytes, self.scan.max_skip_bytes) {
            if skip < prefix {
                warnings.push(format!(
                    "scan.max_skip_bytes ({skip}) is smaller than scan.prefix_bytes ({prefix}); \
                     large top-level elements will end the scan early"
                ));
            }
        }

        if self.tools.ffprobe && self.tools.timeout_secs == 0 {
            warnings.push("tools.timeout_secs is 0; ffprobe will always time out".into());
        }

        if let Some(ref p) = self.tools.ffprobe_path {
            if !p.exists() {
                warnings.push(format!(
                    "tools.ffprobe_path {} does not exist; falling back to PATH",
                    p.display()
                ));
            }
        }

        warnings
    }
}

/// Overrides for the bounded Matroska scan.
///
/// `None` keeps the built-in constant. Both values are empirical and are
/// exposed only so they can be tuned against real-world samples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of leading bytes of the file loaded for parsing.
    pub prefix_bytes: Option<u64>,
    /// Largest top-level element the scan will skip over while looking for Tracks.
    pub max_skip_bytes: Option<u64>,
}

/// External demuxer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Try ffprobe before the built-in parser.
    pub ffprobe: bool,
    /// Explicit ffprobe binary; `PATH` is searched when unset.
    pub ffprobe_path: Option<PathBuf>,
    /// Time budget for a single ffprobe run.
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffprobe: true,
            ffprobe_path: None,
            timeout_secs: DEFAULT_TOOL_TIMEOUT_SECS,
        }
    }
}
