//! pathlinker-common — Shared errors, configuration and the HTTP client used
//! across all PathLinker crates.

pub mod error;
pub mod config;
pub mod sandbox;

// Re-export commonly used types
pub use config::Config;
pub use error::{PathlinkerError, Result};
pub use sandbox::SandboxClient;
