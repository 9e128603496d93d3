//! Mouse gestures over the transcript: right-click seeks, left-drag copies.
//!
//! Rows handed to this module are viewport-relative; the current scroll offset
//! turns them into indices into the display lines.

use crate::reflow::DisplayLine;

/// Where the primary button went down, if a drag is in progress.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
  anchor: Option<(u16, u16)>,
}

impl DragState {
  pub fn press(&mut self, col: u16, row: u16) {
    self.anchor = Some((col, row));
  }

  pub fn anchor(&self) -> Option<(u16, u16)> {
    self.anchor
  }

  /// Finish the drag at `row` and return the text it covers.
  ///
  /// Consumes the anchor; a release without a preceding press yields `None`.
  pub fn release(&mut self, row: u16, offset: usize, lines: &[DisplayLine]) -> Option<String> {
    let (_, anchor_row) = self.anchor.take()?;
    let start = offset + usize::from(anchor_row.min(row));
    let end = offset + usize::from(anchor_row.max(row));
    Some(selection_text(lines, start, end))
  }
}

/// Spoken text of `lines[start..=end]`: trimmed, cue and blank lines dropped,
/// joined with single spaces and no trailing space.
///
/// Bounds past the end of `lines` are clipped, so the result may be empty.
pub fn selection_text(lines: &[DisplayLine], start: usize, end: usize) -> String {
  let end = end.saturating_add(1).min(lines.len());
  let start = start.min(end);
  lines[start..end]
    .iter()
    .filter(|line| !line.is_cue)
    .map(|line| line.text.trim())
    .filter(|text| !text.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Index of the closest cue line at or above viewport row `row`.
///
/// Clicks below the last line start from the last line. Returns `None` when
/// there is no cue above the click.
pub fn find_cue_above(lines: &[DisplayLine], offset: usize, row: u16) -> Option<usize> {
  let last = lines.len().checked_sub(1)?;
  let from = offset.saturating_add(usize::from(row)).min(last);
  lines[..=from].iter().rposition(|line| line.is_cue)
}

/// Start timestamp to seek to for a right-click at viewport row `row`.
///
/// Read from the cue's source line, so a cue wrapped over several rows seeks
/// the same from any of them.
pub fn seek_timestamp(lines: &[DisplayLine], offset: usize, row: u16) -> Option<&str> {
  let idx = find_cue_above(lines, offset, row)?;
  lines[idx].cue_start.as_deref()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::reflow::reflow;

  fn transcript() -> Vec<DisplayLine> {
    reflow(
      &[
        "WEBVTT",
        "",
        "00:00:01.000 --> 00:00:04.000",
        "Hello there",
        "",
        "00:01:02.500 --> 00:01:05.000",
        "General Kenobi",
        "you are a bold one",
      ],
      80,
    )
  }

  // --- selection_text ---

  #[test]
  fn selection_skips_cues_and_joins_with_spaces() {
    let lines = reflow(&["Hello", "00:01.000 --> 00:02.000", "world"], 80);
    assert_eq!(selection_text(&lines, 0, 2), "Hello world");
  }

  #[test]
  fn selection_of_only_cues_and_blanks_is_empty() {
    let lines = reflow(&["00:01.000 --> 00:02.000", "", "   ", "00:02.000 --> 00:03.000"], 80);
    assert_eq!(selection_text(&lines, 0, 3), "");
  }

  #[test]
  fn selection_trims_each_line() {
    let lines = vec![DisplayLine::new("  padded  ", false), DisplayLine::new("\ttabbed", false)];
    assert_eq!(selection_text(&lines, 0, 1), "padded tabbed");
  }

  #[test]
  fn selection_clips_out_of_range_bounds() {
    let lines = transcript();
    assert_eq!(selection_text(&lines, 6, 100), "General Kenobi you are a bold one");
    assert_eq!(selection_text(&lines, 100, 200), "");
    assert_eq!(selection_text(&[], 0, 0), "");
  }

  // --- DragState ---

  #[test]
  fn drag_down_copies_range() {
    let lines = transcript();
    let mut drag = DragState::default();
    drag.press(4, 2);
    assert_eq!(drag.release(6, 0, &lines).as_deref(), Some("Hello there General Kenobi"));
    assert_eq!(drag.anchor(), None);
  }

  #[test]
  fn drag_up_is_same_as_drag_down() {
    let lines = transcript();
    let mut drag = DragState::default();
    drag.press(0, 6);
    assert_eq!(drag.release(2, 0, &lines).as_deref(), Some("Hello there General Kenobi"));
  }

  #[test]
  fn drag_applies_scroll_offset() {
    let lines = transcript();
    let mut drag = DragState::default();
    drag.press(0, 0);
    assert_eq!(drag.release(1, 6, &lines).as_deref(), Some("General Kenobi you are a bold one"));
  }

  #[test]
  fn single_row_click_copies_that_row() {
    let lines = transcript();
    let mut drag = DragState::default();
    drag.press(3, 3);
    assert_eq!(drag.release(3, 0, &lines).as_deref(), Some("Hello there"));
  }

  #[test]
  fn release_without_press_does_nothing() {
    let lines = transcript();
    let mut drag = DragState::default();
    assert_eq!(drag.release(3, 0, &lines), None);
  }

  #[test]
  fn drag_over_cue_only_yields_empty_string() {
    let lines = transcript();
    let mut drag = DragState::default();
    drag.press(0, 4);
    assert_eq!(drag.release(5, 0, &lines).as_deref(), Some(""));
  }

  // --- seek ---

  #[test]
  fn seek_walks_up_to_nearest_cue() {
    let lines = transcript();
    assert_eq!(find_cue_above(&lines, 0, 7), Some(5));
    assert_eq!(seek_timestamp(&lines, 0, 7), Some("00:01:02.500"));
    assert_eq!(seek_timestamp(&lines, 0, 3), Some("00:00:01.000"));
  }

  #[test]
  fn seek_on_cue_line_uses_it() {
    let lines = transcript();
    assert_eq!(find_cue_above(&lines, 0, 5), Some(5));
  }

  #[test]
  fn seek_respects_offset() {
    let lines = transcript();
    assert_eq!(seek_timestamp(&lines, 3, 0), Some("00:00:01.000"));
    assert_eq!(seek_timestamp(&lines, 3, 3), Some("00:01:02.500"));
  }

  #[test]
  fn seek_above_first_cue_is_abandoned() {
    let lines = transcript();
    assert_eq!(find_cue_above(&lines, 0, 1), None);
    assert_eq!(seek_timestamp(&lines, 0, 0), None);
  }

  #[test]
  fn seek_below_last_line_starts_from_last_line() {
    let lines = transcript();
    assert_eq!(seek_timestamp(&lines, 0, 200), Some("00:01:02.500"));
  }

  #[test]
  fn seek_from_wrapped_cue_uses_source_start() {
    let lines = reflow(&["00:00:01.000 --> 00:00:04.000", "hi"], 9);
    // Rows: "00:00:01.000", "-->", "00:00:04.000", "hi".
    assert_eq!(find_cue_above(&lines, 0, 3), Some(2));
    assert_eq!(seek_timestamp(&lines, 0, 3), Some("00:00:01.000"));
    assert_eq!(seek_timestamp(&lines, 0, 1), Some("00:00:01.000"));
  }

  #[test]
  fn seek_without_lines_is_abandoned() {
    assert_eq!(seek_timestamp(&[], 0, 0), None);
  }

  #[test]
  fn seek_hourless_cue() {
    let lines = reflow(&["01:02.500 --> 01:05.000", "text"], 80);
    assert_eq!(seek_timestamp(&lines, 0, 1), Some("01:02.500"));
  }
}
