use crate::document::DocumentWriter;

/// An inline piece of description text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Plain text.
    Plain(String),
    /// Emphasized text; writers decide how to mark it.
    Emphasis(String),
}

/// A block of spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A paragraph of text.
    Paragraph(Vec<Span>),
    /// An item of an implicit list.
    Item(Vec<Span>),
}

impl Block {
    fn spans(&self) -> &Vec<Span> {
        match self {
            Block::Paragraph(spans) | Block::Item(spans) => spans,
        }
    }

    fn spans_mut(&mut self) -> &mut Vec<Span> {
        match self {
            Block::Paragraph(spans) | Block::Item(spans) => spans,
        }
    }
}

/// How the blocks of a [`Description`] are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionStyle {
    /// Paragraphs are written as paragraphs, items as list items.
    Paragraphs,
    /// Every block, paragraphs included, is written as a list item.
    /// Constraint descriptions are written this way when embedded in a parameter's documentation.
    List,
}

/// A small document describing a parameter, command or constraint.
///
/// ### Example
/// ```
/// # use stipulate_builder as stipulate;
/// use stipulate::Description;
///
/// let description = Description::new()
///     .text("The ")
///     .emphasis("level")
///     .text(" to run at.")
///     .paragraph()
///     .text("Higher levels are slower.");
///
/// assert_eq!(description.to_plain(), "The level to run at. Higher levels are slower.");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    blocks: Vec<Block>,
}

impl Description {
    /// Create an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append plain text to the current block.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.current().push(Span::Plain(text.into()));
        self
    }

    /// Append emphasized text to the current block.
    pub fn emphasis(mut self, text: impl Into<String>) -> Self {
        self.current().push(Span::Emphasis(text.into()));
        self
    }

    /// Start a new paragraph.
    pub fn paragraph(mut self) -> Self {
        self.blocks.push(Block::Paragraph(Vec::default()));
        self
    }

    /// Start a new list item.
    pub fn item(mut self) -> Self {
        self.blocks.push(Block::Item(Vec::default()));
        self
    }

    /// The blocks of this description, in order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Whether this description contains any non-empty text.
    pub fn is_empty(&self) -> bool {
        self.blocks
            .iter()
            .all(|block| render(block.spans(), ("", "")).trim().is_empty())
    }

    /// Flatten the description into a single line of plain text.
    pub fn to_plain(&self) -> String {
        self.blocks
            .iter()
            .map(|block| render(block.spans(), ("", "")))
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Write the description via `writer`.
    pub fn write(&self, writer: &mut dyn DocumentWriter, style: DescriptionStyle) {
        match style {
            DescriptionStyle::Paragraphs => {
                let mut in_list = false;

                for block in &self.blocks {
                    let text = render(block.spans(), writer.emphasis_markers());

                    if text.trim().is_empty() {
                        continue;
                    }

                    match block {
                        Block::Paragraph(_) => {
                            if in_list {
                                writer.end_list();
                                in_list = false;
                            }

                            writer.paragraph(&text);
                        }
                        Block::Item(_) => {
                            if !in_list {
                                writer.begin_list();
                                in_list = true;
                            }

                            writer.list_item(&text);
                        }
                    }
                }

                if in_list {
                    writer.end_list();
                }
            }
            DescriptionStyle::List => {
                if !self.is_empty() {
                    writer.begin_list();
                    self.write_items(writer);
                    writer.end_list();
                }
            }
        }
    }

    /// Write every block as a list item, without opening or closing the list.
    /// Used to merge several descriptions into a single list.
    pub fn write_items(&self, writer: &mut dyn DocumentWriter) {
        for block in &self.blocks {
            let text = render(block.spans(), writer.emphasis_markers());

            if !text.trim().is_empty() {
                writer.list_item(&text);
            }
        }
    }

    fn current(&mut self) -> &mut Vec<Span> {
        if self.blocks.is_empty() {
            self.blocks.push(Block::Paragraph(Vec::default()));
        }

        self.blocks
            .last_mut()
            .expect("internal error - blocks must be non-empty")
            .spans_mut()
    }
}

impl From<&str> for Description {
    fn from(value: &str) -> Self {
        Description::new().text(value)
    }
}

impl From<String> for Description {
    fn from(value: String) -> Self {
        Description::new().text(value)
    }
}

fn render(spans: &[Span], (open, close): (&str, &str)) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Plain(text) => text.clone(),
            Span::Emphasis(text) => format!("{open}{text}{close}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryWriter;

    #[test]
    fn empty() {
        let description = Description::new();
        assert!(description.is_empty());
        assert_eq!(description.to_plain(), "");

        let description = Description::new().paragraph().text("  ").item();
        assert!(description.is_empty());
    }

    #[test]
    fn implicit_paragraph() {
        let description = Description::new().text("a").emphasis("b");
        assert_eq!(
            description.blocks(),
            &[Block::Paragraph(vec![
                Span::Plain("a".to_string()),
                Span::Emphasis("b".to_string())
            ])]
        );
    }

    #[test]
    fn write_paragraphs() {
        let description = Description::new()
            .text("first ")
            .emphasis("one")
            .paragraph()
            .text("second")
            .item()
            .text("x")
            .item()
            .text("y")
            .paragraph()
            .text("third");
        let mut writer = MemoryWriter::default();

        description.write(&mut writer, DescriptionStyle::Paragraphs);

        assert_eq!(
            writer.events(),
            &[
                "paragraph: first <one>",
                "paragraph: second",
                "begin_list",
                "item: x",
                "item: y",
                "end_list",
                "paragraph: third",
            ]
        );
    }

    #[test]
    fn write_list() {
        let description = Description::new()
            .text("first")
            .paragraph()
            .text("second")
            .item()
            .emphasis("third");
        let mut writer = MemoryWriter::default();

        description.write(&mut writer, DescriptionStyle::List);

        assert_eq!(
            writer.events(),
            &[
                "begin_list",
                "item: first",
                "item: second",
                "item: <third>",
                "end_list",
            ]
        );
    }

    #[test]
    fn write_list_empty() {
        let mut writer = MemoryWriter::default();
        Description::new().write(&mut writer, DescriptionStyle::List);
        assert!(writer.events().is_empty());
    }

    #[test]
    fn from_str() {
        assert_eq!(Description::from("abc"), Description::new().text("abc"));
        assert_eq!(
            Description::from("abc".to_string()).to_plain(),
            "abc".to_string()
        );
    }
}
