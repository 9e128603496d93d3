use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

use crate::timestamp::{extract_start_timestamp, is_cue_line};

/// One row of transcript text as it appears on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
  pub text: String,
  pub is_cue: bool,
  /// Start timestamp of the cue line this row was wrapped from. Shared by
  /// every row of a wrapped cue, so any of them can be seeked from.
  pub cue_start: Option<String>,
}

impl DisplayLine {
  /// A row holding a whole source line; cue rows take their start from `text`.
  pub fn new(text: impl Into<String>, is_cue: bool) -> Self {
    let text = text.into();
    let cue_start = if is_cue { extract_start_timestamp(&text).map(str::to_string) } else { None };
    Self { text, is_cue, cue_start }
  }
}

/// Word-wrap `raw_lines` to `width` columns.
///
/// Breaks only at ASCII spaces and never splits a word, so a word wider than
/// `width` ends up alone on an over-long row. Every row produced from a cue line
/// is tagged as a cue and carries the cue's start timestamp.
///
/// Blank source lines survive as empty rows. A plain `textwrap::wrap` pass
/// yields no segments for them, which would run cue blocks together.
pub fn reflow<S: AsRef<str>>(raw_lines: &[S], width: usize) -> Vec<DisplayLine> {
  let options = Options::new(width.max(1))
    .break_words(false)
    .wrap_algorithm(WrapAlgorithm::FirstFit)
    .word_separator(WordSeparator::AsciiSpace)
    .word_splitter(WordSplitter::NoHyphenation);

  let mut lines = Vec::with_capacity(raw_lines.len());
  for raw in raw_lines {
    let raw = raw.as_ref();
    let is_cue = is_cue_line(raw);
    if raw.trim().is_empty() {
      lines.push(DisplayLine::new(String::new(), is_cue));
      continue;
    }
    let cue_start = extract_start_timestamp(raw).map(str::to_string);
    lines.extend(textwrap::wrap(raw, &options).into_iter().map(|segment| DisplayLine {
      text: segment.into_owned(),
      is_cue,
      cue_start: cue_start.clone(),
    }));
  }
  lines
}
