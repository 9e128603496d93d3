use tracing::{debug, info, warn};

use crate::clipboard::Clipboard;
use crate::constants::constants;
use crate::player::{PauseTarget, PlayerClient, PlayerTransport};
use crate::reflow::{DisplayLine, reflow};
use crate::selection::{DragState, seek_timestamp};
use crate::theme::{THEMES, Theme};
use crate::viewport::Viewport;

/// Wrap width for a terminal `cols` wide; the last column stays free.
pub fn wrap_width(cols: u16) -> usize {
  usize::from(cols.saturating_sub(1)).max(1)
}

/// Rows given to the status bar on a terminal `rows` high; none when it would
/// leave no room for the transcript.
pub fn status_bar_rows(rows: u16) -> u16 {
  let height = constants().status_bar_height;
  if rows > height { height } else { 0 }
}

/// All state of one viewing session, owned by the event loop.
pub struct App<T> {
  /// Source lines as loaded; every reflow starts from these.
  raw_lines: Vec<String>,
  pub lines: Vec<DisplayLine>,
  pub viewport: Viewport,
  pub source_name: String,
  pub theme_index: usize,
  pub status_message: Option<String>,
  pub last_error: Option<String>,
  /// Pause state last sent to the player, if any.
  pub paused: Option<bool>,
  pub should_quit: bool,
  drag: DragState,
  player: PlayerClient<T>,
  clipboard: Box<dyn Clipboard>,
}

impl<T: PlayerTransport> App<T> {
  pub fn new(
    raw_lines: Vec<String>,
    source_name: String,
    player: PlayerClient<T>,
    clipboard: Box<dyn Clipboard>,
    theme_index: usize,
    (cols, rows): (u16, u16),
  ) -> Self {
    let mut app = Self {
      raw_lines,
      lines: Vec::new(),
      viewport: Viewport::new(0, 0),
      source_name,
      theme_index: theme_index.min(THEMES.len() - 1),
      status_message: None,
      last_error: None,
      paused: None,
      should_quit: false,
      drag: DragState::default(),
      player,
      clipboard,
    };
    app.resize(cols, rows);
    app
  }

  pub fn theme(&self) -> &'static Theme {
    &THEMES[self.theme_index]
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
    self.status_message = Some(format!("Theme: {}", self.theme().name));
  }

  pub fn set_error(&mut self, msg: String) {
    self.status_message = None;
    self.last_error = Some(msg);
  }

  pub fn clear_messages(&mut self) {
    self.status_message = None;
    self.last_error = None;
  }

  /// Adopt a new terminal size: re-wrap from the source lines and re-clamp the offset.
  pub fn resize(&mut self, cols: u16, rows: u16) {
    let transcript_rows = rows - status_bar_rows(rows);
    self.lines = reflow(&self.raw_lines, wrap_width(cols));
    self.viewport.resize(transcript_rows, cols, self.lines.len());
    debug!(cols, rows, lines = self.lines.len(), offset = self.viewport.offset, "app: reflowed");
  }

  pub fn scroll_by(&mut self, delta: i64) {
    self.viewport.scroll_by(delta, self.lines.len());
  }

  pub fn half_page_down(&mut self) {
    self.scroll_by(self.viewport.half_page());
  }

  pub fn half_page_up(&mut self) {
    self.scroll_by(-self.viewport.half_page());
  }

  pub fn scroll_to_top(&mut self) {
    self.viewport.offset = 0;
  }

  /// Last line at the top of an otherwise empty screen, like `G` in a pager.
  pub fn scroll_to_bottom(&mut self) {
    self.viewport.offset = self.lines.len().saturating_sub(1);
  }

  /// Mouse rows below the transcript (the status bar) count as its last row.
  fn transcript_row(&self, row: u16) -> u16 {
    row.min(self.viewport.rows.saturating_sub(1))
  }

  pub async fn toggle_pause(&mut self) {
    let paused = self.player.set_pause(PauseTarget::Toggle).await;
    self.paused = Some(paused);
    self.status_message = Some(if paused { "Paused".to_string() } else { "Playing".to_string() });
  }

  /// Seek to the cue at or above `row` and resume playback.
  pub async fn seek_at(&mut self, row: u16) {
    let row = self.transcript_row(row);
    let Some(timestamp) = seek_timestamp(&self.lines, self.viewport.offset, row).map(str::to_string) else {
      debug!(row, offset = self.viewport.offset, "seek: no cue above click");
      return;
    };
    self.player.set_position(&timestamp);
    self.paused = Some(self.player.set_pause(PauseTarget::Set(false)).await);
    self.status_message = Some(format!("Seek {}", timestamp));
  }

  pub fn is_selecting(&self) -> bool {
    self.drag.anchor().is_some()
  }

  pub fn drag_start(&mut self, col: u16, row: u16) {
    let row = self.transcript_row(row);
    self.drag.press(col, row);
  }

  /// Finish a drag and copy the covered spoken text, even when it is empty.
  pub fn drag_end(&mut self, row: u16) {
    let row = self.transcript_row(row);
    let Some(text) = self.drag.release(row, self.viewport.offset, &self.lines) else { return };
    match self.clipboard.set(&text) {
      Ok(()) => {
        info!(chars = text.chars().count(), "selection: copied to clipboard");
        debug!(text = %text, "selection: copied text");
        self.status_message = Some(format!("Copied {} chars", text.chars().count()));
        self.last_error = None;
      }
      Err(e) => {
        let err = format!("{:#}", e);
        warn!(err = %err, "selection: clipboard write failed");
        self.set_error(format!("Copy failed: {}", err));
      }
    }
  }
}
