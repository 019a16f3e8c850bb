mod text;

pub use text::TextWriter;

/// Behaviour to write documentation in some concrete format.
///
/// The command line model never chooses a rendering format itself; it describes sections, paragraphs, lists and code blocks, and the writer decides what they look like.
/// Implement this trait to render help in other formats (ex: html or wiki markup).
pub trait DocumentWriter {
    /// Open a section at `level` (starting from `1`) with the heading `text`.
    fn begin_section(&mut self, level: usize, text: &str);

    /// Close the section at `level`.
    fn end_section(&mut self, level: usize);

    /// Write a paragraph, which the writer may re-flow.
    fn paragraph(&mut self, text: &str);

    /// Write a single line, which the writer must not re-flow.
    fn line(&mut self, text: &str);

    /// Open a list.
    fn begin_list(&mut self);

    /// Write an item of the currently open list.
    fn list_item(&mut self, text: &str);

    /// Close the currently open list.
    fn end_list(&mut self);

    /// Open a code block.
    fn begin_code(&mut self);

    /// Write a verbatim line of the currently open code block.
    fn code_line(&mut self, text: &str);

    /// Close the currently open code block.
    fn end_code(&mut self);

    /// The opening and closing markers wrapped around emphasized text.
    fn emphasis_markers(&self) -> (&str, &str);
}

/// *Available using 'unit_test' crate feature only.*</br></br>
/// A [`DocumentWriter`] which records each call as a line of text.
/// Emphasis is marked as `<..>`.
///
/// ### Example
/// ```ignore
/// use stipulate::{Description, DescriptionStyle, MemoryWriter};
///
/// let mut writer = MemoryWriter::default();
/// Description::new().emphasis("abc").write(&mut writer, DescriptionStyle::Paragraphs);
/// assert_eq!(writer.events(), &["paragraph: <abc>"]);
/// ```
#[cfg(any(test, feature = "unit_test"))]
#[derive(Debug, Default)]
pub struct MemoryWriter {
    events: Vec<String>,
}

#[cfg(any(test, feature = "unit_test"))]
impl MemoryWriter {
    /// The recorded calls, in order.
    pub fn events(&self) -> &[String] {
        &self.events
    }
}

#[cfg(any(test, feature = "unit_test"))]
impl DocumentWriter for MemoryWriter {
    fn begin_section(&mut self, level: usize, text: &str) {
        self.events.push(format!("section({level}): {text}"));
    }

    fn end_section(&mut self, level: usize) {
        self.events.push(format!("end_section({level})"));
    }

    fn paragraph(&mut self, text: &str) {
        self.events.push(format!("paragraph: {text}"));
    }

    fn line(&mut self, text: &str) {
        self.events.push(format!("line: {text}"));
    }

    fn begin_list(&mut self) {
        self.events.push("begin_list".to_string());
    }

    fn list_item(&mut self, text: &str) {
        self.events.push(format!("item: {text}"));
    }

    fn end_list(&mut self) {
        self.events.push("end_list".to_string());
    }

    fn begin_code(&mut self) {
        self.events.push("begin_code".to_string());
    }

    fn code_line(&mut self, text: &str) {
        self.events.push(format!("code: {text}"));
    }

    fn end_code(&mut self) {
        self.events.push("end_code".to_string());
    }

    fn emphasis_markers(&self) -> (&str, &str) {
        ("<", ">")
    }
}
