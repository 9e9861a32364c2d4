use crate::model::ParseFailure;
use crate::parser::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// Leave some slack on the right of the terminal.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Three average (5 character) words with a space between each.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

/// Widths of the help columns: an indented left column, a wrapped middle column, and any number of right columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnLayout {
    padding: usize,
    left: usize,
    middle: usize,
    rights: Vec<usize>,
}

impl ColumnLayout {
    /// Every column must be at least 1 wide, and the middle at least 2 (so long words can be hyphenated).
    pub(crate) fn new(padding: usize, left: usize, middle: usize, rights: Vec<usize>) -> Option<Self> {
        if padding == 0 || left == 0 || middle < 2 || rights.contains(&0) {
            None
        } else {
            Some(Self {
                padding,
                left,
                middle,
                rights,
            })
        }
    }

    fn fixed_width(&self) -> usize {
        let rights: usize = self.rights.iter().map(|width| self.padding + width).sum();
        self.left + self.padding + rights
    }

    /// Resize the middle column to suit a terminal `total_width` wide.
    /// Returns `None` when the other columns leave less than the minimum middle width.
    pub(crate) fn fit_within(self, total_width: usize) -> Option<Self> {
        let fixed = self.fixed_width();
        let target = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;
        let preferred = std::cmp::max(self.middle, MINIMUM_MIDDLE_WIDTH);

        let middle = if fixed + preferred <= target {
            preferred
        } else if fixed + MINIMUM_MIDDLE_WIDTH <= total_width {
            std::cmp::min(total_width - fixed, preferred)
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Fixed columns {fixed} leave no room for the middle within {total_width}.");
            }

            return None;
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Fixed columns {fixed} within {total_width}; middle column: {middle}.");
        }

        Some(Self { middle, ..self })
    }

    /// Cap the middle column at `width`.
    pub(crate) fn narrow(self, width: usize) -> Self {
        let middle = std::cmp::min(self.middle, width);
        Self { middle, ..self }
    }

    pub(crate) fn render(
        &self,
        indent: usize,
        left: &str,
        middle: &str,
        rights: &[String],
    ) -> Vec<String> {
        assert!(left.len() <= self.left);
        assert!(rights.len() <= self.rights.len());
        let gap = " ".repeat(self.padding);
        let left_width = self.left;
        let middle_width = self.middle - indent;
        let right = if rights.is_empty() {
            None
        } else {
            let cells: Vec<String> = rights
                .iter()
                .zip(&self.rights)
                .enumerate()
                .map(|(i, (cell, &width))| {
                    assert!(cell.len() <= width);

                    if i + 1 < rights.len() {
                        format!("{cell:width$}")
                    } else {
                        cell.clone()
                    }
                })
                .collect();
            Some(cells.join(&gap))
        };

        let lead = format!("{:indent$}{left:left_width$}{gap}", "");
        let mut parts = wrap(middle, middle_width).into_iter();
        let first = match (parts.next(), &right) {
            (Some(part), Some(right)) => format!("{lead}{part:middle_width$}{gap}{right}"),
            (Some(part), None) => format!("{lead}{part}"),
            (None, Some(right)) => format!("{lead}{:middle_width$}{gap}{right}", ""),
            (None, None) => format!("{:indent$}{left}", ""),
        };

        let hanging = format!("{:indent$}{:left_width$}{gap}", "", "");
        let mut lines = vec![first];
        lines.extend(parts.map(|part| format!("{hanging}{part}")));
        lines
    }
}

// Greedy word wrap, by characters; words longer than the line are hyphenated.
fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ').filter(|word| !word.is_empty()) {
        let length = word.chars().count();

        if !current.is_empty() {
            if current.chars().count() + 1 + length <= width {
                current.push(' ');
                current.push_str(word);
                continue;
            }

            lines.push(std::mem::take(&mut current));
        }

        let characters: Vec<char> = word.chars().collect();
        let mut rest = characters.as_slice();

        while rest.len() > width {
            let (head, tail) = rest.split_at(width - 1);
            lines.push(head.iter().collect::<String>() + "-");
            rest = tail;
        }

        current = rest.iter().collect();
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Where the parser sends its help and error output.
pub trait UserInterface {
    /// Print one line of the help message.
    fn print(&self, message: String);

    /// Print the parse failure diagnostic.
    fn print_error(&self, error: ParseFailure);

    /// Print the tokens with a caret under the failure location.
    fn print_error_context(&self, error_context: ErrorContext);
}

/// Prints help to stdout and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseFailure) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}
