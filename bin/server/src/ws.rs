//! Public WebSocket echo channel.

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::Response,
};

/// Upgrades `GET /ws` and echoes every data frame back to the sender.
pub async fn echo(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(echo_socket)
}

async fn echo_socket(mut socket: WebSocket) {
    tracing::debug!("websocket connected");

    while let Some(msg) = socket.recv().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "websocket receive error");
                break;
            }
        };

        let reply = match msg {
            Message::Text(text) => {
                tracing::info!(message = %text.as_str(), "websocket text message");
                Message::Text(text)
            }
            Message::Binary(data) => {
                tracing::info!(bytes = data.len(), "websocket binary message");
                Message::Binary(data)
            }
            Message::Close(_) => break,
            // Pings are answered by the protocol layer.
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        if let Err(e) = socket.send(reply).await {
            tracing::debug!(error = %e, "websocket send error");
            break;
        }
    }

    tracing::debug!("websocket disconnected");
}
