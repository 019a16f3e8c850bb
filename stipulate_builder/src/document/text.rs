use terminal_size::{terminal_size, Width};

use crate::document::DocumentWriter;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_WIDTH: usize = 17;
const DEFAULT_WIDTH: usize = 80;
// We'll target 95% of the total width, to ensure the writer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;
const INDENT: usize = 2;
const CODE_INDENT: usize = 4;
const BULLET: &str = "- ";

/// A plain text [`DocumentWriter`], re-flowing paragraphs and list items to a fixed width.
///
/// ### Example
/// ```
/// # use stipulate_builder as stipulate;
/// use stipulate::{prelude::*, TextWriter};
///
/// let mut writer = TextWriter::new(40);
/// writer.begin_section(1, "usage: program");
/// writer.paragraph("Does awesome things.");
/// writer.end_section(1);
///
/// assert_eq!(writer.into_lines(), vec!["usage: program", "Does awesome things."]);
/// ```
#[derive(Debug)]
pub struct TextWriter {
    width: usize,
    depth: usize,
    lists: usize,
    lines: Vec<String>,
}

impl TextWriter {
    /// Create a writer that wraps text at `width` columns.
    pub fn new(width: usize) -> Self {
        Self {
            width: std::cmp::max(width, MINIMUM_WIDTH),
            depth: 0,
            lists: 0,
            lines: Vec::default(),
        }
    }

    /// Create a writer sized to the current terminal, falling back to a default width.
    pub fn terminal() -> Self {
        let width = match terminal_size() {
            Some((Width(total_width), _)) => {
                (total_width as f64 * TARGET_TOTAL_FACTOR) as usize
            }
            None => DEFAULT_WIDTH,
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Selecting text width: {width}.");
        }

        Self::new(width)
    }

    /// The lines written so far.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn body_indent(&self) -> usize {
        INDENT * self.depth.saturating_sub(1)
    }

    fn available(&self, indent: usize) -> usize {
        std::cmp::max(self.width.saturating_sub(indent), MINIMUM_WIDTH)
    }

    fn push(&mut self, indent: usize, text: &str) {
        self.lines.push(format!("{:indent$}{text}", ""));
    }
}

impl DocumentWriter for TextWriter {
    fn begin_section(&mut self, level: usize, text: &str) {
        // Top level sections are separated by a blank line.
        if level <= 2 && !self.lines.is_empty() {
            self.lines.push(String::default());
        }

        let indent = INDENT * level.saturating_sub(2);
        self.push(indent, text);
        self.depth = level;
    }

    fn end_section(&mut self, level: usize) {
        self.depth = level.saturating_sub(1);
    }

    fn paragraph(&mut self, text: &str) {
        let indent = self.body_indent();

        for part in chunk(text, self.available(indent)) {
            self.push(indent, &part);
        }
    }

    fn line(&mut self, text: &str) {
        let indent = self.body_indent();
        self.push(indent, text);
    }

    fn begin_list(&mut self) {
        self.lists += 1;
    }

    fn list_item(&mut self, text: &str) {
        let indent = self.body_indent() + (INDENT * self.lists.saturating_sub(1));
        let parts = chunk(text, self.available(indent + BULLET.len()));

        for (i, part) in parts.iter().enumerate() {
            if i == 0 {
                self.push(indent, &format!("{BULLET}{part}"));
            } else {
                self.push(indent + BULLET.len(), part);
            }
        }
    }

    fn end_list(&mut self) {
        self.lists = self.lists.saturating_sub(1);
    }

    fn begin_code(&mut self) {
        // Do nothing.
    }

    fn code_line(&mut self, text: &str) {
        let indent = self.body_indent() + CODE_INDENT;
        self.push(indent, text);
    }

    fn end_code(&mut self) {
        // Do nothing.
    }

    fn emphasis_markers(&self) -> (&str, &str) {
        ("", "")
    }
}

pub(crate) fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let chars: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;
    let mut right = increment;

    while right + 1 < chars.len() {
        lines.push(format!("{}-", chars[left..right].iter().collect::<String>()));
        left += increment;
        right += increment;
    }

    current.push_str(&chars[left..].iter().collect::<String>());
}
