//! File logging.
//!
//! The TUI owns stdout, so everything goes to a log file that `subscroll log`
//! can follow from another terminal.

use anyhow::{Context, Result};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::constants::constants;

/// Install the global subscriber writing to `log_path`, truncating any previous log.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(log_path: &Path) -> Result<WorkerGuard> {
  let dir = log_path.parent().context("Log path has no parent directory")?;
  let file_name = log_path.file_name().context("Log path has no file name")?;
  std::fs::create_dir_all(dir).with_context(|| format!("Failed to create log directory {}", dir.display()))?;
  let _ = std::fs::remove_file(log_path);

  let appender = tracing_appender::rolling::never(dir, file_name);
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&constants().default_log_filter));

  let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).try_init();
  Ok(guard)
}

/// Print the log file, then keep printing whatever is appended until interrupted.
///
/// A truncated file (a new viewer session started) is read again from the top.
pub async fn follow(log_path: &Path, out: &mut impl Write) -> Result<()> {
  let interval = Duration::from_millis(constants().log_follow_interval_ms);
  let mut pos = 0u64;
  loop {
    pos = print_new(log_path, pos, out)?;
    tokio::time::sleep(interval).await;
  }
}

/// Copy bytes from `pos` to the end of the file into `out`; returns the new position.
fn print_new(log_path: &Path, pos: u64, out: &mut impl Write) -> Result<u64> {
  let mut file = match std::fs::File::open(log_path) {
    Ok(file) => file,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
    Err(e) => return Err(e).with_context(|| format!("Failed to open {}", log_path.display())),
  };
  let len = file.metadata().context("Failed to stat log file")?.len();
  let start = if len < pos { 0 } else { pos };
  file.seek(SeekFrom::Start(start)).context("Failed to seek log file")?;
  let mut buf = Vec::new();
  file.read_to_end(&mut buf).context("Failed to read log file")?;
  out.write_all(&buf).context("Failed to write log output")?;
  out.flush().context("Failed to flush log output")?;
  Ok(start + buf.len() as u64)
}
