//! Cue-line recognition for WebVTT-style transcripts.
//!
//! A cue line starts with `[HH:]MM:SS.mmm --> [HH:]MM:SS.mmm`. The hour group is
//! optional on each side independently, and anything after the end timestamp
//! (cue settings like `align:start`) is ignored.

use regex::Regex;
use std::sync::LazyLock;

static CUE_LINE: LazyLock<Regex> = LazyLock::new(|| {
  // Safety: the pattern is a literal; a typo here fails every test in this module.
  Regex::new(r"^(?P<start>(?:[0-9]{2}:)?[0-9]{2}:[0-9]{2}\.[0-9]{3}) --> (?:[0-9]{2}:)?[0-9]{2}:[0-9]{2}\.[0-9]{3}")
    .expect("cue line pattern must compile")
});

pub fn is_cue_line(text: &str) -> bool {
  CUE_LINE.is_match(text)
}

/// Start timestamp of a cue line, exactly as written in the file.
///
/// The start is everything before the first ` --> `, which is the first 9
/// characters (`MM:SS.mmm`) when the hour is absent and the first 12
/// (`HH:MM:SS.mmm`) when it is present. Lines that are not cue lines return
/// `None` rather than a slice of whatever happens to sit at those offsets.
pub fn extract_start_timestamp(text: &str) -> Option<&str> {
  CUE_LINE.captures(text).and_then(|caps| caps.name("start")).map(|m| m.as_str())
}
