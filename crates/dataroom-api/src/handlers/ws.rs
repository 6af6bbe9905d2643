//! WebSocket feed handler.

use std::time::Duration;

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use dataroom_service::context::GuestContext;

use crate::dto::request::WsQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/guest/ws?token= — upgrade to the room's realtime feed.
///
/// The session token rides in the query string because browsers cannot
/// set headers on WebSocket upgrades. Standing is re-validated before the
/// upgrade completes.
pub async fn ws_feed(
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let claims = state.token_codec.verify(&query.token)?;
    let ctx = state.session_service.authorize(&claims).await?;

    Ok(ws.on_upgrade(move |socket| room_feed(socket, state, ctx)))
}

/// Forwards room events to one connected guest until either side closes.
async fn room_feed(mut socket: WebSocket, state: AppState, ctx: GuestContext) {
    let mut events = state.realtime.subscribe(ctx.room_id);
    let mut ping = tokio::time::interval(Duration::from_secs(
        state.config.realtime.ping_interval_seconds,
    ));
    ping.reset();

    debug!(guest_id = %ctx.guest_id, room_id = %ctx.room_id, "Guest feed connected");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let Ok(payload) = serde_json::to_string(&event) else {
                        continue;
                    };
                    if socket.send(WsMessage::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                // Fell behind the broadcast buffer. The client's refetch
                // on the next event restores consistency.
                Err(RecvError::Lagged(skipped)) => {
                    debug!(guest_id = %ctx.guest_id, skipped, "Guest feed lagged");
                }
                Err(RecvError::Closed) => break,
            },
            _ = ping.tick() => {
                if socket.send(WsMessage::Ping(Vec::new().into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => match incoming {
                Some(Ok(WsMessage::Close(_))) | Some(Err(_)) | None => break,
                _ => {}
            },
        }
    }

    debug!(guest_id = %ctx.guest_id, room_id = %ctx.room_id, "Guest feed disconnected");
}
