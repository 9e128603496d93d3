use anyhow::{Context, Result};

/// Sink for copied transcript text.
pub trait Clipboard {
  fn set(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via `arboard`.
///
/// The handle is created on first use and kept for the whole session: on X11
/// and Wayland the copied text disappears when its owner is dropped.
#[derive(Default)]
pub struct SystemClipboard {
  inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
  pub fn new() -> Self {
    Self { inner: None }
  }
}

impl Clipboard for SystemClipboard {
  fn set(&mut self, text: &str) -> Result<()> {
    let clipboard = match self.inner.take() {
      Some(clipboard) => clipboard,
      None => arboard::Clipboard::new().context("Failed to open system clipboard")?,
    };
    self.inner.insert(clipboard).set_text(text.to_string()).context("Failed to write to system clipboard")
  }
}
