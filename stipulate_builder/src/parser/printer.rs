use crate::api::{ArgumentElement, Command, OptionElement, ValueSpec};
use crate::constant::*;
use crate::description::{Description, DescriptionStyle};
use crate::document::DocumentWriter;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Document `command`, invoked as `program`, via `writer`.
pub(crate) fn document(command: &Command, program: &str, writer: &mut dyn DocumentWriter) {
    #[cfg(feature = "tracing_debug")]
    {
        debug!(
            "Documenting '{program}': {o} option(s), {a} argument(s), {c} command(s).",
            o = command.options().len(),
            a = command.arguments().len(),
            c = command.commands().len()
        );
    }

    writer.begin_section(1, &usage(command, program));

    if let Some(summary) = command.summary_text() {
        writer.paragraph(summary);
    }

    command
        .description_text()
        .write(writer, DescriptionStyle::Paragraphs);
    writer.end_section(1);

    if !command.arguments().is_empty() {
        writer.begin_section(2, "positional arguments:");

        for argument in command.arguments() {
            writer.begin_section(3, &display_name(argument.name()));
            document_element(argument.description(), Some(argument.value()), writer);
            writer.end_section(3);
        }

        writer.end_section(2);
    }

    writer.begin_section(2, "options:");
    writer.begin_section(3, &format!("-{HELP_SHORT}, --{HELP_NAME}"));
    writer.paragraph(HELP_MESSAGE);
    writer.end_section(3);
    let mut options: Vec<&OptionElement> = command.options().iter().collect();
    options.sort_by(|a, b| a.name().cmp(b.name()));

    for option in options {
        writer.begin_section(3, &option_heading(option));
        document_element(option.description(), option.value(), writer);
        writer.end_section(3);
    }

    writer.end_section(2);

    if !command.commands().is_empty() {
        writer.begin_section(2, "commands:");

        for sub_command in command.commands() {
            writer.begin_section(3, sub_command.name());

            if let Some(summary) = sub_command.summary_text() {
                writer.paragraph(summary);
            }

            writer.end_section(3);
        }

        writer.end_section(2);
    }
}

fn document_element(
    description: &Description,
    value: Option<&ValueSpec>,
    writer: &mut dyn DocumentWriter,
) {
    description.write(writer, DescriptionStyle::Paragraphs);

    if let Some(value) = value {
        value
            .description()
            .write(writer, DescriptionStyle::Paragraphs);

        if let Some(default) = value.default() {
            writer.paragraph(&format!("default: {default}"));
        }

        let mut constraints = value.constraints().peekable();

        if constraints.peek().is_some() {
            // All the constraints make up a single list.
            writer.begin_list();

            for constraint in constraints {
                constraint.describe().write_items(writer);
            }

            writer.end_list();
        }
    }
}

fn usage(command: &Command, program: &str) -> String {
    let mut parts = vec![format!("usage: {program}"), format!("[-{HELP_SHORT}]")];

    for option in command.options() {
        let name = match option.short() {
            Some(short) => format!("-{short}"),
            None => format!("--{n}", n = option.name()),
        };
        let grammar = match option.meta() {
            Some(meta) => format!("[{name} {meta}]"),
            None => format!("[{name}]"),
        };

        if option.is_repeated() {
            parts.push(format!("{grammar} ..."));
        } else {
            parts.push(grammar);
        }
    }

    for argument in command.arguments() {
        parts.push(argument_grammar(argument));
    }

    if !command.commands().is_empty() {
        let names: Vec<&str> = command.commands().iter().map(|c| c.name()).collect();
        parts.push(format!("{{{}}} ...", names.join(", ")));
    }

    parts.join(" ")
}

fn argument_grammar(argument: &ArgumentElement) -> String {
    let name = display_name(argument.name());

    match (argument.is_repeated(), argument.is_optional()) {
        (false, false) => name,
        (false, true) => format!("[{name}]"),
        (true, false) => format!("{name} [...]"),
        (true, true) => format!("[{name} ...]"),
    }
}

fn option_heading(option: &OptionElement) -> String {
    let suffix = option.meta().map(|m| format!(" {m}")).unwrap_or_default();

    option
        .short()
        .map(|s| format!("-{s}"))
        .into_iter()
        .chain(option.long_names().map(|n| format!("--{n}")))
        .map(|n| format!("{n}{suffix}"))
        .collect::<Vec<String>>()
        .join(", ")
}

fn display_name(name: &str) -> String {
    name.to_ascii_uppercase().replace('-', "_")
}

/// The tokens given to the parser, with a caret pointing at the byte `offset` where parsing failed.
/// The offset counts token bytes only (not the spaces between tokens).
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total: usize = self.tokens.iter().map(|t| t.len()).sum();
        // The caret never goes past the final character.
        let target = std::cmp::min(self.offset, total.saturating_sub(1));
        let mut seen = 0;
        let mut spaces = 0;

        for token in self.tokens.iter().take(self.tokens.len().saturating_sub(1)) {
            seen += token.len();

            if seen <= target {
                spaces += 1;
            }
        }

        write!(
            f,
            "{line}\n{:width$}^",
            "",
            line = self.tokens.join(" "),
            width = target + spaces
        )
    }
}
