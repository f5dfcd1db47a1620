/*!
RPC request/response types and dispatch.
*/

#![allow(missing_docs)]

use chimera::{Chimera, Input, Snapshot, Window, WindowId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use ts_rs::TS;

/// RPC request.
#[derive(Debug, Deserialize, TS)]
#[serde(tag = "method", content = "args", rename_all = "snake_case")]
#[ts(export)]
pub enum RpcRequest {
  /// Get a snapshot of current state.
  Snapshot,
  /// Get one window by id.
  Window { window_id: WindowId },
  /// Open a window.
  Open { window_id: WindowId },
  /// Close a window.
  Close { window_id: WindowId },
  /// Focus a window.
  Focus { window_id: WindowId },
  /// Run a terminal line.
  Submit { line: String },
  /// Next theme.
  CycleTheme,
  /// Forward a page input through the dispatch table.
  Input { input: Input },
}

/// RPC response.
#[derive(Debug, Serialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum RpcResponse {
  /// Full state snapshot.
  Snapshot(Box<Snapshot>),
  /// Single window.
  Window(Box<Window>),
  /// No data.
  Null,
}

pub fn dispatch_json(chimera: &Chimera, method: &str, args: &JsonValue) -> JsonValue {
  let request_value = if args.is_null() {
    json!({ "method": method })
  } else {
    json!({ "method": method, "args": args })
  };

  match serde_json::from_value::<RpcRequest>(request_value) {
    Ok(request) => match dispatch(chimera, request) {
      Ok(response) => json!({ "result": response }),
      Err(e) => {
        log::warn!("[rpc] {method} failed: {e}");
        json!({ "error": e })
      }
    },
    Err(e) => {
      log::warn!("[rpc] Invalid request for {method}: {e}");
      json!({ "error": format!("Invalid request: {}", e) })
    }
  }
}

pub fn dispatch(chimera: &Chimera, request: RpcRequest) -> Result<RpcResponse, String> {
  match request {
    RpcRequest::Snapshot => Ok(RpcResponse::Snapshot(Box::new(chimera.snapshot()))),

    RpcRequest::Window { window_id } => {
      let window = chimera.window(&window_id).map_err(|e| e.to_string())?;
      Ok(RpcResponse::Window(Box::new(window)))
    }

    RpcRequest::Open { window_id } => {
      chimera.open(&window_id);
      Ok(RpcResponse::Null)
    }

    RpcRequest::Close { window_id } => {
      chimera.close(&window_id);
      Ok(RpcResponse::Null)
    }

    RpcRequest::Focus { window_id } => {
      chimera.focus(&window_id);
      Ok(RpcResponse::Null)
    }

    RpcRequest::Submit { line } => {
      chimera.submit(&line);
      Ok(RpcResponse::Null)
    }

    RpcRequest::CycleTheme => {
      chimera.cycle_theme();
      Ok(RpcResponse::Null)
    }

    RpcRequest::Input { input } => {
      chimera.dispatch(input);
      Ok(RpcResponse::Null)
    }
  }
}
