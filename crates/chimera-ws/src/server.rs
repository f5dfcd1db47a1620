/*!
WebSocket server implementation.

Every connection starts with `sync:init` and then follows the desktop's
event stream. Clients send two kinds of text frames:

- RPC requests `{ "id", "method", "args" }`, answered with `{ "id", "result" | "error" }`
- bare page inputs `{ "input": "pointer_move", "data": { "x": 1, "y": 2 } }`,
  which are dispatched without a reply

On `system:reload` the socket is closed after the event is delivered, the
way a page reload would drop it. The client reconnects and gets a fresh
snapshot.
*/

use axum::{
  extract::{
    ws::{Message, WebSocket, WebSocketUpgrade},
    State,
  },
  response::Response,
  routing::get,
  Router,
};
use chimera::{Chimera, Event, Input};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

/// Default WebSocket server port.
pub const DEFAULT_WS_PORT: u16 = 3030;
const FANOUT_CAPACITY: usize = 1000;

/// A serialized event on its way to every socket.
#[derive(Debug, Clone)]
struct Outbound {
  json: String,
  /// The session ended; sockets close after delivering this.
  reload: bool,
}

/// WebSocket state.
#[derive(Clone)]
pub struct WebSocketState {
  chimera: Chimera,
  fanout: broadcast::Sender<Outbound>,
  port: u16,
}

impl std::fmt::Debug for WebSocketState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WebSocketState")
      .field("port", &self.port)
      .field("clients", &self.fanout.receiver_count())
      .finish_non_exhaustive()
  }
}

impl WebSocketState {
  /// Create with default port.
  pub fn new(chimera: Chimera) -> Self {
    Self::with_port(chimera, DEFAULT_WS_PORT)
  }

  /// Create with custom port.
  pub fn with_port(chimera: Chimera, port: u16) -> Self {
    let (fanout, _) = broadcast::channel(FANOUT_CAPACITY);
    Self {
      chimera,
      fanout,
      port,
    }
  }
}

/// Start the WebSocket server. Returns once the server stops.
pub async fn start_server(state: WebSocketState) -> std::io::Result<()> {
  // Subscribe before spawning so nothing emitted in between is missed.
  tokio::spawn(forward_events(
    state.chimera.subscribe(),
    state.fanout.clone(),
  ));

  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods(Any)
    .allow_headers(Any);

  let addr = format!("127.0.0.1:{}", state.port);
  let app = Router::new()
    .route("/ws", get(upgrade))
    .layer(cors)
    .with_state(state);

  let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
    log::error!("Failed to bind WebSocket server to {addr}: {e}");
    e
  })?;
  info!("WebSocket server: ws://{addr}/ws");

  axum::serve(listener, app).await
}

/// Serialize desktop events once and fan them out to every socket.
///
/// `sync:init` is never forwarded: each socket sends its own on connect,
/// and after a reboot the sockets have already closed.
async fn forward_events(
  mut events: async_broadcast::Receiver<Event>,
  fanout: broadcast::Sender<Outbound>,
) {
  loop {
    let event = match events.recv().await {
      Ok(event) => event,
      Err(async_broadcast::RecvError::Overflowed(n)) => {
        warn!("[ws] Forwarder fell behind, {n} events dropped");
        continue;
      }
      Err(async_broadcast::RecvError::Closed) => break,
    };
    if matches!(event, Event::SyncInit(_)) {
      continue;
    }

    match serde_json::to_string(&event) {
      Ok(json) => {
        let reload = matches!(event, Event::Reload);
        // No connected sockets is fine.
        drop(fanout.send(Outbound { json, reload }));
      }
      Err(e) => warn!("[ws] Failed to serialize {}: {e}", event.name()),
    }
  }
  debug!("[ws] Event forwarder stopped");
}

async fn upgrade(ws: WebSocketUpgrade, State(state): State<WebSocketState>) -> Response {
  ws.on_upgrade(|socket| handle_socket(socket, state))
}

fn snapshot_json(chimera: &Chimera) -> Option<String> {
  let event = Event::SyncInit(Box::new(chimera.snapshot()));
  serde_json::to_string(&event)
    .map_err(|e| warn!("[ws] Failed to serialize snapshot: {e}"))
    .ok()
}

async fn send_snapshot(socket: &mut WebSocket, chimera: &Chimera) -> bool {
  match snapshot_json(chimera) {
    Some(json) => socket.send(Message::Text(json)).await.is_ok(),
    None => false,
  }
}

async fn handle_socket(mut socket: WebSocket, state: WebSocketState) {
  let mut outbound = state.fanout.subscribe();
  if !send_snapshot(&mut socket, &state.chimera).await {
    return;
  }
  debug!("[client] connected");

  loop {
    tokio::select! {
        frame = socket.recv() => match frame {
            Some(Ok(Message::Text(text))) => {
                if let Some(reply) = handle_frame(&text, &state.chimera).await {
                    if socket.send(Message::Text(reply)).await.is_err() {
                        break;
                    }
                }
            }
            Some(Ok(Message::Close(_))) | None => {
                debug!("[client] disconnected");
                break;
            }
            Some(Err(e)) => {
                warn!("WebSocket error: {e}");
                break;
            }
            Some(Ok(_)) => {}
        },

        out = outbound.recv() => match out {
            Ok(out) => {
                if socket.send(Message::Text(out.json)).await.is_err() {
                    break;
                }
                if out.reload {
                    debug!("[client] closing for reload");
                    drop(socket.send(Message::Close(None)).await);
                    break;
                }
            }
            // Missed events can't be replayed; a fresh snapshot brings the client back in line.
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!("[ws] Client lagged by {n} events, resyncing");
                if !send_snapshot(&mut socket, &state.chimera).await {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Closed) => break,
        },
    }
  }
}

/// Incoming text frame.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClientFrame {
  Request {
    #[serde(default)]
    id: Value,
    method: String,
    #[serde(default)]
    args: Value,
  },
  Input(Input),
}

/// Handle one frame. Returns the reply to send, if the frame wants one.
async fn handle_frame(text: &str, chimera: &Chimera) -> Option<String> {
  let frame = match serde_json::from_str::<ClientFrame>(text) {
    Ok(frame) => frame,
    Err(e) => {
      debug!("[ws] Unreadable frame: {e}");
      return Some(json!({ "error": format!("Invalid frame: {e}") }).to_string());
    }
  };

  match frame {
    ClientFrame::Input(input) => {
      chimera.dispatch(input);
      None
    }
    ClientFrame::Request { id, method, args } => {
      let chimera = chimera.clone();
      let mut reply = tokio::task::spawn_blocking(move || {
        crate::rpc::dispatch_json(&chimera, &method, &args)
      })
      .await
      .unwrap_or_else(|_| json!({ "error": "RPC task panicked" }));

      if let Some(obj) = reply.as_object_mut() {
        obj.insert("id".to_string(), id);
      }
      Some(reply.to_string())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chimera::WindowId;
  use std::time::Duration;

  fn chimera() -> Chimera {
    Chimera::builder().manual_clock().build().unwrap()
  }

  #[tokio::test]
  async fn request_reply_carries_id() {
    let reply = handle_frame(r#"{"id":7,"method":"snapshot"}"#, &chimera())
      .await
      .unwrap();
    let value: Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(value["id"], 7);
    assert!(value["result"]["windows"].is_array());
  }

  #[tokio::test]
  async fn bare_input_is_dispatched_without_reply() {
    let chimera = chimera();
    let reply = handle_frame(r#"{"input":"theme_switcher_click"}"#, &chimera).await;
    assert!(reply.is_none());
    assert_eq!(chimera.theme(), "matrix");

    let reply = handle_frame(
      r#"{"input":"dock_click","data":{"window_id":"window-projects"}}"#,
      &chimera,
    )
    .await;
    assert!(reply.is_none());
    assert_eq!(chimera.active_window(), Some(WindowId::from_name("projects")));
  }

  #[tokio::test]
  async fn unreadable_frame_gets_error() {
    let reply = handle_frame("{not json", &chimera()).await.unwrap();
    let value: Value = serde_json::from_str(&reply).unwrap();
    assert!(value["error"].as_str().unwrap().starts_with("Invalid frame"));

    let reply = handle_frame(r#"{"input":"warp_drive"}"#, &chimera()).await;
    assert!(reply.is_some());
  }

  #[tokio::test]
  async fn reboot_marks_reload_and_skips_sync_init() {
    let chimera = chimera();
    let (fanout, mut rx) = broadcast::channel(FANOUT_CAPACITY);
    tokio::spawn(forward_events(chimera.subscribe(), fanout));

    chimera.submit("reboot");
    chimera.advance(Duration::from_secs(1));
    chimera.submit("fnaf");

    let mut seen = Vec::new();
    loop {
      let out = rx.recv().await.unwrap();
      let done = out.json.contains("WAS THAT THE BITE");
      seen.push(out);
      if done {
        break;
      }
    }

    assert_eq!(seen.iter().filter(|o| o.reload).count(), 1);
    assert!(seen.iter().any(|o| o.json.contains("system:reload") && o.reload));
    assert!(seen.iter().all(|o| !o.json.contains("sync:init")));
  }
}
