use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::player::PlayerTransport;

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Quit,
  ScrollDown,
  ScrollUp,
  HalfPageDown,
  HalfPageUp,
  Top,
  Bottom,
  TogglePause,
  NextTheme,
}

pub fn key_action(key: &KeyEvent) -> Option<Action> {
  if key.modifiers.contains(KeyModifiers::CONTROL) {
    return match key.code {
      KeyCode::Char('c') => Some(Action::Quit),
      KeyCode::Char('d') => Some(Action::HalfPageDown),
      KeyCode::Char('u') => Some(Action::HalfPageUp),
      KeyCode::Char('t') => Some(Action::NextTheme),
      _ => None,
    };
  }
  match key.code {
    KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
    KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
    KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
    KeyCode::Char('d') | KeyCode::PageDown => Some(Action::HalfPageDown),
    KeyCode::Char('u') | KeyCode::PageUp => Some(Action::HalfPageUp),
    KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
    KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
    KeyCode::Char('p') | KeyCode::Char(' ') => Some(Action::TogglePause),
    _ => None,
  }
}

// --- Event Handling ---

/// Apply one terminal event to the app.
pub async fn handle_event<T: PlayerTransport>(app: &mut App<T>, event: Event) {
  match event {
    Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key).await,
    Event::Mouse(mouse) => handle_mouse_event(app, mouse).await,
    Event::Resize(cols, rows) => app.resize(cols, rows),
    _ => {}
  }
}

pub async fn handle_key_event<T: PlayerTransport>(app: &mut App<T>, key: KeyEvent) {
  let Some(action) = key_action(&key) else { return };
  app.clear_messages();
  match action {
    Action::Quit => app.should_quit = true,
    Action::ScrollDown => app.scroll_by(1),
    Action::ScrollUp => app.scroll_by(-1),
    Action::HalfPageDown => app.half_page_down(),
    Action::HalfPageUp => app.half_page_up(),
    Action::Top => app.scroll_to_top(),
    Action::Bottom => app.scroll_to_bottom(),
    Action::TogglePause => app.toggle_pause().await,
    Action::NextTheme => app.next_theme(),
  }
}

pub async fn handle_mouse_event<T: PlayerTransport>(app: &mut App<T>, mouse: MouseEvent) {
  match mouse.kind {
    MouseEventKind::Down(MouseButton::Right) => app.seek_at(mouse.row).await,
    MouseEventKind::Down(MouseButton::Left) => app.drag_start(mouse.column, mouse.row),
    MouseEventKind::Up(MouseButton::Left) => app.drag_end(mouse.row),
    MouseEventKind::ScrollDown => app.scroll_by(1),
    MouseEventKind::ScrollUp => app.scroll_by(-1),
    _ => {}
  }
}
