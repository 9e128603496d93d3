use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use crate::app::{App, status_bar_rows};
use crate::player::PlayerTransport;
use crate::theme::Theme;
use crate::viewport::visible_slice;

const HINTS: &str = "j/k scroll  d/u half page  p pause  right-click seek  drag copy  q quit";

pub fn ui<T: PlayerTransport>(frame: &mut Frame, app: &App<T>) {
  let area = frame.area();
  let [transcript_area, status_area] =
    Layout::vertical([Constraint::Min(0), Constraint::Length(status_bar_rows(area.height))]).areas(area);

  render_transcript(frame, app, transcript_area);
  render_status(frame, app, status_area);
}

fn render_transcript<T: PlayerTransport>(frame: &mut Frame, app: &App<T>, area: Rect) {
  if area.is_empty() {
    return;
  }
  let theme = app.theme();
  let lines: Vec<Line> = visible_slice(&app.lines, app.viewport.offset, area.height, area.width)
    .into_iter()
    .map(|line| {
      let style = if line.is_cue { Style::default().fg(theme.cue) } else { Style::default().fg(theme.fg) };
      Line::from(Span::styled(line.text, style))
    })
    .collect();
  frame.render_widget(Paragraph::new(lines), area);
}

fn position_label<T: PlayerTransport>(app: &App<T>) -> String {
  let total = app.lines.len();
  let percent = if total == 0 { 100 } else { app.viewport.offset * 100 / total };
  format!(" {}/{} {:>3}% ", app.viewport.offset, total, percent)
}

fn render_status<T: PlayerTransport>(frame: &mut Frame, app: &App<T>, area: Rect) {
  if area.is_empty() {
    return;
  }
  let theme: &Theme = app.theme();
  let position = position_label(app);
  let position_w = (position.chars().count() as u16).min(area.width);

  let (text, style) = if let Some(err) = &app.last_error {
    (format!(" ⚠  {}", err), Style::default().fg(theme.error))
  } else if app.is_selecting() {
    (" Selecting, release to copy".to_string(), Style::default().fg(theme.status))
  } else if let Some(msg) = &app.status_message {
    (format!(" {}", msg), Style::default().fg(theme.status))
  } else {
    let pause = match app.paused {
      Some(true) => "⏸ ",
      Some(false) => "▶ ",
      None => "",
    };
    (format!(" {}{}  {}", pause, app.source_name, HINTS), Style::default().fg(theme.muted))
  };

  let left_area = Rect { width: area.width.saturating_sub(position_w), ..area };
  frame.render_widget(Paragraph::new(text).style(style), left_area);

  let right_area = Rect { x: area.x + area.width - position_w, width: position_w, ..area };
  let right = Line::from(Span::styled(position, Style::default().fg(theme.muted).add_modifier(Modifier::BOLD)));
  frame.render_widget(right, right_area);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::app::tests::make_app;
  use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

  fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width).map(|x| buffer[(x, y)].symbol().to_string()).collect::<String>()
  }

  #[test]
  fn renders_visible_lines_and_status() {
    let (app, _, _) = make_app(40, 5);
    let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
    terminal.draw(|frame| ui(frame, &app)).unwrap();
    let buffer = terminal.backend().buffer();
    assert!(row_text(buffer, 0).starts_with("WEBVTT"));
    assert!(row_text(buffer, 2).starts_with("00:00:01.000 --> 00:00:04.000"));
    assert!(row_text(buffer, 4).contains("0/7"));
  }

  #[test]
  fn cue_lines_use_cue_colour() {
    let (app, _, _) = make_app(40, 5);
    let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
    terminal.draw(|frame| ui(frame, &app)).unwrap();
    let buffer = terminal.backend().buffer();
    let theme = app.theme();
    assert_eq!(buffer[(0, 2)].fg, theme.cue);
    assert_eq!(buffer[(0, 3)].fg, theme.fg);
  }

  #[test]
  fn renders_from_offset() {
    let (mut app, _, _) = make_app(40, 5);
    app.scroll_by(3);
    let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
    terminal.draw(|frame| ui(frame, &app)).unwrap();
    assert!(row_text(terminal.backend().buffer(), 0).starts_with("So the first thing you notice"));
  }

  #[test]
  fn error_takes_priority_in_status_bar() {
    let (mut app, _, _) = make_app(60, 4);
    app.status_message = Some("Copied 3 chars".to_string());
    app.set_error("Copy failed: no display".to_string());
    let mut terminal = Terminal::new(TestBackend::new(60, 4)).unwrap();
    terminal.draw(|frame| ui(frame, &app)).unwrap();
    assert!(row_text(terminal.backend().buffer(), 3).contains("Copy failed"));
  }

  #[test]
  fn drag_in_progress_shows_hint() {
    let (mut app, _, _) = make_app(60, 4);
    app.drag_start(0, 1);
    let mut terminal = Terminal::new(TestBackend::new(60, 4)).unwrap();
    terminal.draw(|frame| ui(frame, &app)).unwrap();
    assert!(row_text(terminal.backend().buffer(), 3).contains("release to copy"));
  }

  #[test]
  fn one_row_terminal_shows_transcript() {
    let (mut app, _, _) = make_app(80, 24);
    app.scroll_by(3);
    app.resize(40, 1);
    let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
    terminal.draw(|frame| ui(frame, &app)).unwrap();
    assert!(row_text(terminal.backend().buffer(), 0).starts_with("So the first"));
  }

  #[test]
  fn tiny_terminals_do_not_panic() {
    for (w, h) in [(10, 1), (1, 1), (10, 2), (3, 10), (0, 0)] {
      let (mut app, _, _) = make_app(80, 24);
      app.scroll_by(4);
      app.resize(w, h);
      let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
      terminal.draw(|frame| ui(frame, &app)).unwrap();
    }
  }

  #[test]
  fn position_label_at_end() {
    let (mut app, _, _) = make_app(40, 5);
    app.scroll_by(100);
    assert_eq!(position_label(&app), " 7/7 100% ");
  }
}
