use ratatui::style::Color;

pub struct Theme {
  pub name: &'static str,
  pub fg: Color,
  /// Timestamp (cue) lines.
  pub cue: Color,
  pub muted: Color,
  pub status: Color,
  pub error: Color,
}

pub static THEMES: [Theme; 3] = [
  Theme {
    name: "default",
    fg: Color::Reset,
    cue: Color::DarkGray,
    muted: Color::DarkGray,
    status: Color::Cyan,
    error: Color::LightRed,
  },
  Theme {
    name: "pastel",
    fg: Color::Rgb(0xe8, 0xe3, 0xf0),
    cue: Color::Rgb(0xb4, 0x9c, 0xd8),
    muted: Color::Rgb(0x8a, 0x84, 0x96),
    status: Color::Rgb(0x9c, 0xd8, 0xc4),
    error: Color::Rgb(0xf2, 0x9c, 0xa3),
  },
  Theme { name: "mono", fg: Color::Reset, cue: Color::Gray, muted: Color::Gray, status: Color::White, error: Color::White },
];

/// Theme called `name`, or the first theme when it is unknown or unset.
pub fn theme_index(name: Option<&str>) -> usize {
  name.and_then(|n| THEMES.iter().position(|t| t.name.eq_ignore_ascii_case(n))).unwrap_or(0)
}
