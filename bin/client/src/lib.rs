//! Command-line companion to the cito server's `/ws` channel.
//!
//! Reads lines from an input stream and sends each one as a text frame.

pub mod config;
pub mod error;
pub mod relay;

pub use config::ClientConfig;
pub use error::ClientError;
pub use relay::{RelaySummary, relay_lines};
