//! Unified error type for trackscan.
//!
//! Listing audio tracks is a best-effort enrichment, so most of these errors
//! are logged and swallowed by the strategy chain rather than shown to users.

/// Unified error type covering all failure modes in trackscan.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// An external tool (ffprobe) was missing, failed, or timed out.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// A lister could not make sense of the file or the tool output.
    #[error("Probe error: {0}")]
    Probe(String),
}

impl Error {
    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Whether this error means "the strategy could not run here" rather than
    /// "the strategy ran and produced garbage".
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::Io { .. } | Error::Tool { .. })
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
