use unicode_width::UnicodeWidthChar;

use crate::reflow::DisplayLine;

/// Clamp a requested scroll offset into `0..=total`.
///
/// `total` itself is a valid offset: it scrolls the last line just off the top.
pub fn clamp_offset(requested: i64, total: usize) -> usize {
  let total_i = i64::try_from(total).unwrap_or(i64::MAX);
  // Both bounds fit in usize after the clamp.
  requested.clamp(0, total_i) as usize
}

/// Scroll position plus the size of the transcript area it scrolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
  pub offset: usize,
  pub rows: u16,
  pub cols: u16,
}

impl Viewport {
  pub fn new(rows: u16, cols: u16) -> Self {
    Self { offset: 0, rows, cols }
  }

  pub fn scroll_by(&mut self, delta: i64, total: usize) {
    let current = i64::try_from(self.offset).unwrap_or(i64::MAX);
    self.offset = clamp_offset(current.saturating_add(delta), total);
  }

  /// Lines moved by a half-page scroll; never zero so `d`/`u` always move.
  pub fn half_page(&self) -> i64 {
    i64::from(self.rows / 2).max(1)
  }

  pub fn resize(&mut self, rows: u16, cols: u16, total: usize) {
    self.rows = rows;
    self.cols = cols;
    self.offset = self.offset.min(total);
  }
}

/// A display line trimmed to what fits on one screen row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleLine<'a> {
  pub text: &'a str,
  pub is_cue: bool,
}

/// Compute what the screen shows for a given scroll position.
///
/// At most `rows` lines starting at `offset`, each cut at `cols` display
/// columns so an over-long word at the bottom edge can't spill past the
/// buffer. Pure, so the rendering rules can be tested without a terminal.
pub fn visible_slice(lines: &[DisplayLine], offset: usize, rows: u16, cols: u16) -> Vec<VisibleLine<'_>> {
  lines
    .iter()
    .skip(offset)
    .take(usize::from(rows))
    .map(|line| VisibleLine { text: clip_to_width(&line.text, usize::from(cols)), is_cue: line.is_cue })
    .collect()
}

/// Longest prefix of `s` whose display width is at most `max_width`.
fn clip_to_width(s: &str, max_width: usize) -> &str {
  let mut used = 0;
  for (idx, c) in s.char_indices() {
    let w = c.width().unwrap_or(0);
    if used + w > max_width {
      return &s[..idx];
    }
    used += w;
  }
  s
}
