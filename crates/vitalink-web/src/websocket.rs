//! WebSocket handler for live readings.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    debug!("Viewer connecting");
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Relay broadcast readings to one viewer until either side goes away.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.broadcaster.subscribe();

    let viewers = state.broadcaster.viewer_count();
    info!(viewers, "Viewer connected");

    let mut send_task = tokio::spawn(async move {
        loop {
            let event = match rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Viewer fell behind, skipping readings");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    error!(error = %e, "Failed to encode viewer event");
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                debug!("WebSocket send failed, viewer disconnected");
                break;
            }
        }
    });

    // Viewers are receive-only; client frames are drained until close.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                debug!("Viewer sent close frame");
                break;
            }
        }
    });

    // Whichever half ends first takes the other down. Awaiting the aborted
    // task guarantees the subscription is released before we return.
    let send_finished = tokio::select! {
        _ = &mut send_task => true,
        _ = &mut recv_task => false,
    };
    if send_finished {
        recv_task.abort();
        let _ = recv_task.await;
    } else {
        send_task.abort();
        let _ = send_task.await;
    }

    info!(viewers = state.broadcaster.viewer_count(), "Viewer disconnected");
}
