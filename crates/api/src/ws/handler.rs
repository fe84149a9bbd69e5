use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use reel_pipeline::Pipeline;

use crate::state::AppState;
use crate::ws::messages::{parse_client_text, ServerMessage};

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection gets its own search session, driven by
/// inbound text frames and mirrored back by a sender task.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.pipeline))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Starts a search session (discovery runs after the first quiet period).
///   2. Spawns a sender task that forwards state and trending changes.
///   3. Feeds inbound text frames into the session as the query.
///   4. Shuts the session down on disconnect.
async fn handle_socket(socket: WebSocket, pipeline: Pipeline) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    let session = pipeline.start_session();
    let mut states = session.subscribe();
    let mut trending = session.subscribe_trending();

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        // Current values first; the session may have moved on before the
        // receivers were taken.
        let mut backlog = vec![ServerMessage::State {
            state: states.borrow_and_update().clone(),
        }];
        let records = trending.borrow_and_update().clone();
        if !records.is_empty() {
            backlog.push(ServerMessage::Trending { records });
        }
        backlog.reverse();

        loop {
            let message = match backlog.pop() {
                Some(message) => message,
                None => tokio::select! {
                    changed = states.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        ServerMessage::State { state: states.borrow_and_update().clone() }
                    }
                    changed = trending.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        ServerMessage::Trending { records: trending.borrow_and_update().clone() }
                    }
                },
            };

            let json = match message.to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(conn_id = %sender_conn_id, error = %e, "Failed to encode frame");
                    continue;
                }
            };
            if sink.send(Message::Text(json.into())).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let query = parse_client_text(text.as_str());
                tracing::trace!(conn_id = %conn_id, query = %query, "Query updated");
                session.set_query(query);
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    session.shutdown().await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
