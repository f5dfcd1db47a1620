//! `chimera` - run the desktop and serve it over WebSocket.
//!
//! Environment:
//! - `CHIMERA_CONFIG`: path to a JSON config file (optional, partial configs allowed)
//! - `CHIMERA_PORT`: WebSocket port (default 3030)
//! - `RUST_LOG`: log filter, e.g. `chimera=debug`

use chimera::{Chimera, Config};
use chimera_ws::{start_server, WebSocketState, DEFAULT_WS_PORT};
use std::error::Error;

fn load_config() -> Result<Config, Box<dyn Error>> {
  match std::env::var("CHIMERA_CONFIG") {
    Ok(path) => {
      let json = std::fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config {path}: {e}"))?;
      Ok(Config::from_json(&json)?)
    }
    Err(_) => Ok(Config::default()),
  }
}

fn port() -> Result<u16, Box<dyn Error>> {
  match std::env::var("CHIMERA_PORT") {
    Ok(port) => Ok(port
      .parse()
      .map_err(|e| format!("Invalid CHIMERA_PORT {port:?}: {e}"))?),
    Err(_) => Ok(DEFAULT_WS_PORT),
  }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
  env_logger::init();

  let config = load_config()?;
  let chimera = Chimera::builder().config(config).build()?;
  log::info!("Chimera booting");

  start_server(WebSocketState::with_port(chimera, port()?)).await?;
  Ok(())
}
