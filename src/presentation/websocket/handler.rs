//! WebSocket Connection Handler
//!
//! Each socket gets a writer task draining its relay queue and a reader
//! loop dispatching inbound frames. No authentication is performed.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::messages::{events, RelayFrame};
use super::relay::Relay;
use crate::startup::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let relay = state.relay.clone();
    ws.max_message_size(state.settings.websocket.max_message_size)
        .on_upgrade(move |socket| handle_socket(socket, relay))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, relay: Arc<Relay>) {
    let connection_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    relay.register(connection_id, tx);

    // Ends when the relay drops our sender (unregister or shutdown).
    let mut send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sender.send(Message::Text(text.into())).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    });

    let reader_relay = relay.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => dispatch_frame(&reader_relay, connection_id, &text),
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(%connection_id, error = %e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    relay.unregister(connection_id);
}

/// Route one inbound text frame
pub(crate) fn dispatch_frame(relay: &Relay, connection_id: Uuid, text: &str) {
    let frame = match serde_json::from_str::<RelayFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!(%connection_id, error = %e, "Ignoring malformed relay frame");
            return;
        }
    };

    match frame.event.as_str() {
        events::CHAT_MESSAGE => {
            let reached = relay.broadcast(text);
            tracing::debug!(%connection_id, reached, "Relayed chat message");
        }
        events::JOIN => match frame.chat_id() {
            Some(chat_id) => relay.join(connection_id, chat_id),
            None => tracing::debug!(%connection_id, "join without a valid chatId"),
        },
        events::LEAVE => match frame.chat_id() {
            Some(chat_id) => relay.leave(connection_id, chat_id),
            None => tracing::debug!(%connection_id, "leave without a valid chatId"),
        },
        other => tracing::debug!(%connection_id, event = %other, "Ignoring unknown relay event"),
    }
}
