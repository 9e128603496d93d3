//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!` so it's always available,
//! with no runtime file I/O. Parsed once on first access via `LazyLock`.

use serde::Deserialize;
use std::sync::LazyLock;

/// All tuneable application constants.
#[derive(Debug, Deserialize)]
pub struct Constants {
  pub app_name: String,

  // Player IPC
  pub default_socket_path: String,
  /// mpv may interleave event lines before a reply; give up after this many.
  pub max_response_lines: usize,

  // Logging
  pub log_file_name: String,
  pub default_log_filter: String,
  pub log_follow_interval_ms: u64,

  // Subtitle extraction
  pub ffmpeg_binary: String,
  pub container_extensions: Vec<String>,

  // Event loop / layout
  pub poll_interval_ms: u64,
  pub status_bar_height: u16,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; if it's malformed every test fails immediately.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn embedded_constants_parse() {
    let c = constants();
    assert_eq!(c.app_name, "subscroll");
    assert_eq!(c.default_socket_path, "/tmp/mpvsocket");
    assert!(c.container_extensions.iter().any(|e| e == "mkv"));
    assert_eq!(c.status_bar_height, 1);
  }
}
