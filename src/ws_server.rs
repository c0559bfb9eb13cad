// WebSocket relay for draft-room events.
//
// Clients join a draft room and publish pick/removal events; the relay
// rebroadcasts them to every subscriber of that room. There are no ordering
// or delivery guarantees beyond what the transport provides: a publisher
// need not have joined the room, and publishing to an empty room is a no-op.

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc, RwLock};
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

/// Broadcast capacity per room; slow subscribers past this many pending
/// messages drop the oldest ones.
const ROOM_CAPACITY: usize = 256;

// ---------------------------------------------------------------------------
// Protocol
// ---------------------------------------------------------------------------

/// Events a client may send, one JSON object per text frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Subscribe this connection to a draft room.
    JoinDraft { draft_id: String },
    /// Announce a pick to everyone in the room.
    DraftPick { draft_id: String, player: Value },
    /// Announce a pick removal to everyone in the room.
    RemovePick { draft_id: String, player_id: String },
}

impl ClientEvent {
    /// Parse a text frame. Malformed frames yield `None` and are ignored
    /// by the relay (logged at the call site).
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}

/// Serialized form of the events rebroadcast to room subscribers.
pub fn player_drafted_frame(player: &Value) -> String {
    json!({ "event": "player_drafted", "payload": player }).to_string()
}

pub fn player_removed_frame(player_id: &str) -> String {
    json!({ "event": "player_removed", "payload": player_id }).to_string()
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// Registry of draft rooms, each backed by a broadcast channel.
#[derive(Clone, Default)]
pub struct Rooms {
    inner: Arc<RwLock<HashMap<String, broadcast::Sender<String>>>>,
}

impl Rooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a room, creating it on first join.
    pub async fn join(&self, draft_id: &str) -> broadcast::Receiver<String> {
        let mut rooms = self.inner.write().await;
        rooms
            .entry(draft_id.to_string())
            .or_insert_with(|| broadcast::channel(ROOM_CAPACITY).0)
            .subscribe()
    }

    /// Publish a frame to every subscriber of a room. Returns the number of
    /// subscribers reached; a missing or empty room reaches zero.
    pub async fn publish(&self, draft_id: &str, frame: String) -> usize {
        let rooms = self.inner.read().await;
        match rooms.get(draft_id) {
            Some(sender) => sender.send(frame).unwrap_or(0),
            None => 0,
        }
    }

    /// Apply one parsed client event: join returns a receiver, the publish
    /// events return `None`. This is the pure-logic core of the relay,
    /// testable without sockets.
    pub async fn handle_event(&self, event: ClientEvent) -> Option<broadcast::Receiver<String>> {
        match event {
            ClientEvent::JoinDraft { draft_id } => {
                info!("client joined draft {draft_id}");
                Some(self.join(&draft_id).await)
            }
            ClientEvent::DraftPick { draft_id, player } => {
                let reached = self
                    .publish(&draft_id, player_drafted_frame(&player))
                    .await;
                info!("draft_pick in {draft_id} relayed to {reached} subscribers");
                None
            }
            ClientEvent::RemovePick {
                draft_id,
                player_id,
            } => {
                let reached = self
                    .publish(&draft_id, player_removed_frame(&player_id))
                    .await;
                info!("remove_pick in {draft_id} relayed to {reached} subscribers");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// Bind the relay on the given port and run it. Accepts connections forever
/// (until the task is cancelled or the process exits).
pub async fn run(port: u16, rooms: Rooms) -> anyhow::Result<()> {
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    serve(listener, rooms).await
}

/// Run the relay on an already-bound listener. Split out from [`run`] so
/// tests can bind an ephemeral port first.
pub async fn serve(listener: TcpListener, rooms: Rooms) -> anyhow::Result<()> {
    let local_addr = listener.local_addr()?;
    info!("WebSocket relay listening on {local_addr}");

    loop {
        let (stream, addr) = listener.accept().await?;
        let addr_str = addr.to_string();
        let rooms = rooms.clone();

        tokio::spawn(async move {
            let ws_stream = match tokio_tungstenite::accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    warn!("WebSocket handshake failed for {addr_str}: {e}");
                    return;
                }
            };
            info!("client connected from {addr_str}");
            handle_connection(ws_stream, rooms, &addr_str).await;
            info!("client {addr_str} disconnected");
        });
    }
}

/// Drive one connection: parse incoming frames, apply them to the room
/// registry, and forward every subscribed room's broadcasts back out.
async fn handle_connection<S>(
    ws_stream: tokio_tungstenite::WebSocketStream<S>,
    rooms: Rooms,
    addr: &str,
) where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let (mut sink, mut stream) = ws_stream.split();

    // All outbound traffic for this connection funnels through one channel
    // so multiple room subscriptions share the single sink.
    let (out_tx, mut out_rx) = mpsc::channel::<String>(ROOM_CAPACITY);

    loop {
        tokio::select! {
            outbound = out_rx.recv() => {
                // The sender side is held by this task and its forwarders,
                // so recv only fails once every forwarder is gone.
                let Some(frame) = outbound else { break };
                if sink.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        let Some(event) = ClientEvent::parse(&text) else {
                            warn!("ignoring malformed frame from {addr}");
                            continue;
                        };
                        if let Some(mut receiver) = rooms.handle_event(event).await {
                            let out = out_tx.clone();
                            tokio::spawn(async move {
                                while let Ok(frame) = receiver.recv().await {
                                    if out.send(frame).await.is_err() {
                                        break;
                                    }
                                }
                            });
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("client {addr} closed the connection");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error from {addr}: {e}");
                        break;
                    }
                    _ => {
                        // Ignore Binary, Ping, Pong, Frame variants.
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
