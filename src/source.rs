use anyhow::{Context, Result, anyhow, bail};
use std::path::Path;
use std::process::Stdio;
use tracing::info;

use crate::constants::constants;

/// How a transcript is obtained from a given path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
  /// A WebVTT file read as-is.
  Vtt,
  /// A media container whose first subtitle track is extracted with ffmpeg.
  Container,
}

impl SourceKind {
  pub fn detect(path: &Path) -> Result<Self> {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).unwrap_or_default();
    if ext == "vtt" {
      return Ok(SourceKind::Vtt);
    }
    if constants().container_extensions.iter().any(|known| *known == ext) {
      return Ok(SourceKind::Container);
    }
    if ext.is_empty() {
      bail!("Unsupported subtitle source: {} has no file extension", path.display());
    }
    bail!("Unsupported subtitle source: .{}", ext)
  }
}

/// Load the raw transcript lines for `path`, line terminators removed.
pub async fn load_transcription(path: &Path) -> Result<Vec<String>> {
  match SourceKind::detect(path)? {
    SourceKind::Vtt => {
      info!(path = %path.display(), "source: opening transcription file");
      read_lines(path).await
    }
    SourceKind::Container => {
      info!(path = %path.display(), "source: extracting subtitles from media file");
      extract_subtitles(path).await
    }
  }
}

async fn read_lines(path: &Path) -> Result<Vec<String>> {
  let content =
    tokio::fs::read_to_string(path).await.with_context(|| format!("Failed to read {}", path.display()))?;
  Ok(split_lines(&content))
}

fn split_lines(content: &str) -> Vec<String> {
  content.trim_start_matches('\u{feff}').lines().map(str::to_string).collect()
}

/// Extract the first subtitle stream of `media` to a temporary WebVTT file and read it.
async fn extract_subtitles(media: &Path) -> Result<Vec<String>> {
  let c = constants();
  let out_path = std::env::temp_dir().join(format!("{}-{}.vtt", c.app_name, std::process::id()));
  // Remove stale output from a previous crash.
  let _ = std::fs::remove_file(&out_path);

  let status = tokio::process::Command::new(&c.ffmpeg_binary)
    .arg("-y")
    .arg("-i")
    .arg(media)
    .args(["-map", "0:s:0"])
    .arg(&out_path)
    .stdin(Stdio::null())
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .status()
    .await
    .map_err(|e| {
      if e.kind() == std::io::ErrorKind::NotFound {
        anyhow!("ffmpeg not found. Install it with: brew install ffmpeg (macOS) or apt install ffmpeg (Linux)")
      } else {
        anyhow!(e).context("Failed to start ffmpeg")
      }
    })?;

  if !status.success() {
    let _ = std::fs::remove_file(&out_path);
    bail!("ffmpeg could not extract a subtitle track from {} ({})", media.display(), status);
  }

  let lines = read_lines(&out_path).await;
  let _ = std::fs::remove_file(&out_path);
  lines
}
