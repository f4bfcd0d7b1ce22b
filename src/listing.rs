//! Assembly of the audio-track listing chain from configuration.

use ts_av::{FfprobeLister, ToolRegistry};
use ts_core::config::{Config, ScanConfig};
use ts_probe::{CompositeLister, EbmlLister, ScanLimits, TrackLister};

/// Scan limits with any configured overrides applied.
pub fn scan_limits(scan: &ScanConfig) -> ScanLimits {
    let defaults = ScanLimits::default();
    ScanLimits {
        prefix_len: scan
            .prefix_bytes
            .map(|b| usize::try_from(b).unwrap_or(usize::MAX))
            .unwrap_or(defaults.prefix_len),
        max_skip_len: scan.max_skip_bytes.unwrap_or(defaults.max_skip_len),
    }
}

/// Build the ordered strategy chain: ffprobe (when enabled and installed),
/// then the built-in Matroska parser.
///
/// `external` lets a caller switch the ffprobe strategy off regardless of
/// configuration.
pub fn build_lister(config: &Config, external: bool) -> CompositeLister {
    let mut listers: Vec<Box<dyn TrackLister>> = Vec::new();

    if external && config.tools.ffprobe {
        let registry = ToolRegistry::discover(&config.tools);
        match registry.get("ffprobe") {
            Some(tool) => listers.push(Box::new(FfprobeLister::from_tool(tool))),
            None => tracing::debug!("ffprobe not available; using the built-in parser only"),
        }
    }

    listers.push(Box::new(EbmlLister::with_limits(scan_limits(&config.scan))));
    CompositeLister::new(listers)
}
