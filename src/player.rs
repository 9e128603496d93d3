//! mpv JSON IPC client.
//!
//! Every call opens the socket, writes one newline-terminated JSON command,
//! optionally reads the reply, and closes. Nothing is kept between calls.

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as TokioBufReader};
use tracing::{debug, error, info, warn};

use crate::constants::constants;

/// One mpv IPC command object, e.g. `{"command":["get_property","pause"],"async":true}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerCommand {
  pub command: Vec<Value>,
  #[serde(rename = "async")]
  pub is_async: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_id: Option<i64>,
}

impl PlayerCommand {
  pub fn set_property(name: &str, value: Value) -> Self {
    Self { command: vec![json!("set_property"), json!(name), value], is_async: true, request_id: None }
  }

  pub fn get_property(name: &str, request_id: i64) -> Self {
    Self { command: vec![json!("get_property"), json!(name)], is_async: true, request_id: Some(request_id) }
  }

  /// Serialized form as written to the socket, newline included.
  pub fn to_line(&self) -> Result<String> {
    let mut line = serde_json::to_string(self).context("Failed to serialize mpv command")?;
    line.push('\n');
    Ok(line)
  }
}

/// Reply to a query. `data` is `Some(Value::Null)` when mpv sent an explicit
/// null and `None` when the field was missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayerResponse {
  #[serde(default, deserialize_with = "present")]
  pub data: Option<Value>,
  #[serde(default)]
  pub error: Option<String>,
  #[serde(default)]
  pub request_id: Option<i64>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
  Value::deserialize(deserializer).map(Some)
}

/// How commands reach the player.
///
/// `send` must not block the caller and reports nothing back; `query` waits for
/// the player's reply and returns every failure to the caller.
#[allow(async_fn_in_trait)]
pub trait PlayerTransport {
  fn send(&self, command: PlayerCommand);
  async fn query(&self, command: PlayerCommand) -> Result<PlayerResponse>;
}

/// Talks to mpv over its `--input-ipc-server` Unix socket.
#[derive(Debug, Clone)]
pub struct SocketTransport {
  socket_path: PathBuf,
}

impl SocketTransport {
  pub fn new(socket_path: impl Into<PathBuf>) -> Self {
    let socket_path = socket_path.into();
    info!(socket = %socket_path.display(), "player: using mpv socket");
    Self { socket_path }
  }
}

async fn write_command(socket_path: &Path, line: &str) -> Result<tokio::net::UnixStream> {
  let mut stream =
    tokio::net::UnixStream::connect(socket_path).await.context("Failed to connect to mpv IPC socket")?;
  stream.write_all(line.as_bytes()).await.context("Failed to write to mpv IPC socket")?;
  Ok(stream)
}

/// Write one command and close the connection without reading a reply.
async fn deliver(socket_path: &Path, command: &PlayerCommand) -> Result<()> {
  let line = command.to_line()?;
  write_command(socket_path, &line).await.map(drop)
}

impl PlayerTransport for SocketTransport {
  fn send(&self, command: PlayerCommand) {
    let socket_path = self.socket_path.clone();
    tokio::spawn(async move {
      match deliver(&socket_path, &command).await {
        Ok(()) => debug!(command = ?command.command, "player: sent"),
        Err(e) => {
          let err = format!("{:#}", e);
          warn!(err = %err, command = ?command.command, "player: send failed");
        }
      }
    });
  }

  async fn query(&self, command: PlayerCommand) -> Result<PlayerResponse> {
    let line = command.to_line()?;
    let stream = write_command(&self.socket_path, &line).await?;

    let mut lines = TokioBufReader::new(stream).lines();
    // mpv may emit event lines before our reply.
    for _ in 0..constants().max_response_lines {
      let Some(reply) = lines.next_line().await.context("Failed to read from mpv IPC socket")? else { break };
      let value: Value = serde_json::from_str(&reply).with_context(|| format!("Malformed mpv reply: {}", reply))?;
      if value.get("event").is_some() {
        continue;
      }
      let response: PlayerResponse = serde_json::from_value(value).context("Unexpected mpv reply shape")?;
      if command.request_id.is_none() || response.request_id == command.request_id {
        return Ok(response);
      }
    }
    Err(anyhow!("mpv closed the socket without replying"))
  }
}

/// Pause state to request from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseTarget {
  Set(bool),
  Toggle,
}

/// Loose truthiness for mpv property values (`null`, `false`, `0`, `""`, `[]`, `{}` are false).
pub fn truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(a) => !a.is_empty(),
    Value::Object(o) => !o.is_empty(),
  }
}

/// Playback control on top of a [`PlayerTransport`].
pub struct PlayerClient<T> {
  transport: T,
  next_request_id: i64,
}

impl<T: PlayerTransport> PlayerClient<T> {
  pub fn new(transport: T) -> Self {
    Self { transport, next_request_id: 1 }
  }

  #[cfg(test)]
  pub fn transport(&self) -> &T {
    &self.transport
  }

  /// Seek to `timestamp`, passed through verbatim for mpv to parse.
  pub fn set_position(&self, timestamp: &str) {
    info!(timestamp, "player: seek");
    self.transport.send(PlayerCommand::set_property("playback-time", json!(timestamp)));
  }

  /// Whether the player reports itself paused. Any failure reads as "not paused".
  pub async fn get_pause_state(&mut self) -> bool {
    match self.query_pause().await {
      Ok(paused) => paused,
      Err(e) => {
        let err = format!("{:#}", e);
        error!(err = %err, "player: pause query failed, assuming playing");
        false
      }
    }
  }

  async fn query_pause(&mut self) -> Result<bool> {
    let request_id = self.next_request_id;
    self.next_request_id += 1;
    let response = self.transport.query(PlayerCommand::get_property("pause", request_id)).await?;
    if let Some(err) = response.error.as_deref()
      && err != "success"
    {
      bail!("mpv returned error: {}", err);
    }
    let data = response.data.context("mpv reply has no data field")?;
    Ok(truthy(&data))
  }

  /// Apply `target` and return the pause state that was sent.
  pub async fn set_pause(&mut self, target: PauseTarget) -> bool {
    let pause = match target {
      PauseTarget::Set(pause) => pause,
      PauseTarget::Toggle => !self.get_pause_state().await,
    };
    debug!(pause, "player: set pause");
    self.transport.send(PlayerCommand::set_property("pause", Value::Bool(pause)));
    pause
  }
}

/// In-memory transport that records commands and replays scripted replies.
#[cfg(test)]
#[derive(Default, Clone)]
pub struct FakeTransport {
  sent: std::sync::Arc<std::sync::Mutex<Vec<PlayerCommand>>>,
  replies: std::sync::Arc<std::sync::Mutex<std::collections::VecDeque<Result<PlayerResponse, String>>>>,
}

#[cfg(test)]
impl FakeTransport {
  pub fn reply(&self, reply: Result<PlayerResponse, String>) {
    self.replies.lock().expect("replies lock").push_back(reply);
  }

  pub fn sent(&self) -> Vec<PlayerCommand> {
    self.sent.lock().expect("sent lock").clone()
  }
}

#[cfg(test)]
impl PlayerTransport for FakeTransport {
  fn send(&self, command: PlayerCommand) {
    self.sent.lock().expect("sent lock").push(command);
  }

  async fn query(&self, command: PlayerCommand) -> Result<PlayerResponse> {
    self.sent.lock().expect("sent lock").push(command);
    let reply = self.replies.lock().expect("replies lock").pop_front();
    match reply {
      Some(Ok(response)) => Ok(response),
      Some(Err(msg)) => Err(anyhow!(msg)),
      None => Err(anyhow!("no reply scripted")),
    }
  }
}
