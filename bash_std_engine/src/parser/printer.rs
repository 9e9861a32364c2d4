use terminal_size::{terminal_size, Width};

use crate::api::Spec;
use crate::constant::*;
use crate::model::{OptionDef, OptionKind};
use crate::parser::interface::UserInterface;
use crate::parser::{ColumnLayout, MINIMUM_MIDDLE_WIDTH};

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

struct Row {
    left: String,
    help: String,
    meta: Vec<String>,
}

pub(crate) struct Printer<'s> {
    spec: &'s Spec,
    terminal_width: Option<usize>,
}

impl<'s> Printer<'s> {
    pub(crate) fn terminal_width() -> Option<usize> {
        terminal_size().map(|(Width(width), _)| width as usize)
    }

    pub(crate) fn new(spec: &'s Spec, terminal_width: Option<usize>) -> Self {
        Self {
            spec,
            terminal_width,
        }
    }

    pub(crate) fn print_help(
        &self,
        program: &str,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        for line in self.render_help(program) {
            user_interface.print(line);
        }
    }

    pub(crate) fn render_help(&self, program: &str) -> Vec<String> {
        let mut usage = vec![format!("[{HELP_SHORT}]")];
        let mut arguments = Vec::default();
        let mut options = vec![Row {
            left: format!("{HELP_SHORT}, {HELP_NAME}"),
            help: HELP_MESSAGE.to_string(),
            meta: Vec::default(),
        }];

        for definition in self.spec.definitions() {
            let (grammar, row) = describe(definition);

            if definition.is_required() {
                usage.push(grammar);
            } else {
                usage.push(format!("[{grammar}]"));
            }

            if definition.kind() == OptionKind::Positional {
                arguments.push(row);
            } else {
                options.push(row);
            }
        }

        let layout = self.layout(arguments.iter().chain(options.iter()));
        let mut lines = vec![format!("usage: {program} {}", usage.join(" "))];

        for (title, rows) in [("positional arguments:", &arguments), ("options:", &options)] {
            if rows.is_empty() {
                continue;
            }

            lines.push(String::default());
            lines.push(title.to_string());

            for row in rows {
                lines.extend(layout.render(MAIN_INDENT, &row.left, &row.help, &row.meta));
            }
        }

        lines
    }

    fn layout<'r>(&self, rows: impl Iterator<Item = &'r Row>) -> ColumnLayout {
        let mut left = 0;
        let mut middle = 0;
        let mut rights: Vec<usize> = Vec::default();

        for row in rows {
            left = std::cmp::max(left, row.left.len());
            middle = std::cmp::max(middle, row.help.len() + MAIN_INDENT);

            for (i, cell) in row.meta.iter().enumerate() {
                match rights.get_mut(i) {
                    Some(width) => *width = std::cmp::max(*width, cell.len()),
                    None => rights.push(std::cmp::max(1, cell.len())),
                }
            }
        }

        let layout = ColumnLayout::new(PADDING_WIDTH, left, middle, rights)
            .expect("internal error - the help row is always present");

        // Without a (wide enough) terminal, fall back to a narrow middle column.
        match self.terminal_width {
            Some(total_width) => layout
                .clone()
                .fit_within(total_width)
                .unwrap_or_else(|| layout.narrow(MINIMUM_MIDDLE_WIDTH)),
            None => layout.narrow(MINIMUM_MIDDLE_WIDTH),
        }
    }
}

// The usage grammar and the help row of one option.
fn describe(definition: &OptionDef) -> (String, Row) {
    let help = definition.help().to_string();

    match definition.kind() {
        OptionKind::Flag => (
            short_name(definition).to_string(),
            Row {
                left: definition.names().join(", "),
                help,
                meta: Vec::default(),
            },
        ),
        OptionKind::Value => {
            let placeholder = definition
                .placeholder()
                .expect("internal error - value options must have a placeholder");
            (
                format!("{} {placeholder}", short_name(definition)),
                Row {
                    left: format!("{} {placeholder}", definition.names().join(", ")),
                    help,
                    meta: vec![requirement(definition)],
                },
            )
        }
        OptionKind::Positional => {
            let upper = definition.key().to_ascii_uppercase();
            (
                upper.clone(),
                Row {
                    left: upper,
                    help,
                    meta: vec![requirement(definition)],
                },
            )
        }
    }
}

// The first single-dash alias reads best in the usage summary.
fn short_name(definition: &OptionDef) -> &str {
    definition
        .names()
        .iter()
        .find(|name| !name.starts_with("--"))
        .unwrap_or(&definition.names()[0])
}

fn requirement(definition: &OptionDef) -> String {
    match definition.default() {
        Some(default) => format!("[default: {default}]"),
        None => "[required]".to_string(),
    }
}

/// The Cli tokens, with a caret pointing at the location of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    /// Point at `offset` within the concatenation (without separators) of `tokens`.
    pub fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tokens_length = 0;
        let mut projection = String::default();
        let mut separators = 0;

        for (i, token) in self.tokens.iter().enumerate() {
            tokens_length += token.len();
            projection.push_str(token);

            if i + 1 < self.tokens.len() {
                projection.push(' ');

                if tokens_length <= self.offset {
                    separators += 1;
                }
            }
        }

        // The offset counts bytes, while the caret is placed by characters.
        let joined = self.tokens.concat();
        let characters = joined.chars().count();
        let before = joined
            .char_indices()
            .take_while(|(index, _)| *index < self.offset)
            .count();

        write!(
            f,
            "{projection}\n{:width$}^",
            "",
            width = std::cmp::min(before, characters.saturating_sub(1)) + separators
        )
    }
}
