//! Sends input lines to the echo channel.

use futures::{SinkExt, StreamExt};
use rootcause::Report;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Outcome of one relay session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelaySummary {
    /// Number of lines sent as text frames.
    pub sent: usize,
    /// Text frames the server wrote back, in arrival order.
    pub echoed: Vec<String>,
}

/// Connects to `config.ws_url` and sends every line of `input` as a text frame.
///
/// Stops at end of input, closes the connection and collects whatever the
/// server wrote back before the connection ended.
///
/// # Errors
///
/// Returns `ClientError::Connect` if the handshake fails or exceeds the
/// configured deadline, `ClientError::Input` if reading `input` fails, and
/// `ClientError::Send` if a frame cannot be written.
pub async fn relay_lines<R>(
    input: R,
    config: &ClientConfig,
) -> Result<RelaySummary, Report<ClientError>>
where
    R: AsyncBufRead + Unpin,
{
    info!(url = %config.ws_url, "connecting");
    let (mut socket, _) =
        tokio::time::timeout(config.handshake_timeout(), connect_async(config.ws_url.as_str()))
            .await
            .map_err(|_| ClientError::Connect {
                reason: format!(
                    "handshake timed out after {}s",
                    config.handshake_timeout_seconds
                ),
            })?
            .map_err(|e| ClientError::Connect {
                reason: e.to_string(),
            })?;

    let mut summary = RelaySummary::default();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.map_err(|e| ClientError::Input {
        reason: e.to_string(),
    })? {
        socket
            .send(Message::Text(line.clone()))
            .await
            .map_err(|e| ClientError::Send {
                reason: e.to_string(),
            })?;
        info!(message = %line, "sent");
        summary.sent += 1;
    }

    if let Err(e) = socket.close(None).await {
        debug!(error = %e, "close handshake failed");
    }

    while let Some(msg) = socket.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                debug!(message = %text, "received");
                summary.echoed.push(text);
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, "connection ended");
                break;
            }
        }
    }

    info!(sent = summary.sent, "input exhausted, disconnected");
    Ok(summary)
}
