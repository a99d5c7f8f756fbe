//! Error types for the client.

use std::fmt;

/// Errors from a relay session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The WebSocket handshake failed or timed out.
    Connect { reason: String },
    /// Reading the input stream failed.
    Input { reason: String },
    /// Writing a frame to the server failed.
    Send { reason: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect { reason } => write!(f, "failed to connect: {reason}"),
            Self::Input { reason } => write!(f, "failed to read input: {reason}"),
            Self::Send { reason } => write!(f, "failed to send message: {reason}"),
        }
    }
}

impl std::error::Error for ClientError {}
