//! # ts-av
//!
//! External tool plumbing for trackscan.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache the path to
//!   ffprobe, honouring a configured override.
//! - **Command execution** ([`ToolCommand`]) -- async builder with timeout
//!   support for running external processes.
//! - **Listing backend** ([`probe::FfprobeLister`]) -- implements
//!   [`ts_probe::TrackLister`] by shelling out to ffprobe.

pub mod command;
pub mod probe;
pub mod tools;

// ---- Re-exports for convenience ----

pub use command::{ToolCommand, ToolOutput};
pub use probe::FfprobeLister;
pub use tools::{ToolConfig, ToolInfo, ToolRegistry};
