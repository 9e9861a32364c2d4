use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::api::line::{parse_line, Malformed};
use crate::constant::*;
use crate::model::{OptionDef, OptionKind, ParseOutcome};
use crate::parser::{
    Action, ConsoleInterface, GeneralParser, Parser, Printer, UserInterface,
};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A specification line that could not be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Spec error: line {line} '{text}': {reason}")]
pub struct SpecError {
    line: usize,
    text: String,
    reason: Malformed,
}

impl SpecError {
    fn new(line: usize, text: &str, reason: Malformed) -> Self {
        Self {
            line,
            text: text.to_string(),
            reason,
        }
    }

    /// The 1-based line number of the offending line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The offending line, as written.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Why the line was rejected.
    pub fn reason(&self) -> &Malformed {
        &self.reason
    }
}

/// The parsed option specification.
///
/// Immutable once parsed; one `Spec` may resolve any number of token sets.
///
/// ### Example
/// ```
/// # use bash_std_engine as bash_std;
/// use bash_std::{ParseOutcome, ParseSettings, Spec};
///
/// let spec = Spec::parse("--verbose,-v; More output\n--mode=<mode>; Processing mode").unwrap();
///
/// match spec.resolve(&["-v", "--mode=fast"], &ParseSettings::default()) {
///     ParseOutcome::Success(resolved) => {
///         assert_eq!(resolved.get("verbose"), Some("1"));
///         assert_eq!(resolved.get("mode"), Some("fast"));
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    definitions: Vec<OptionDef>,
    aliases: HashMap<String, usize>,
    positionals: Vec<usize>,
}

impl Spec {
    /// Parse the option specification, one option per line.
    ///
    /// Blank lines are ignored.
    /// Parsing stops at the first malformed line.
    pub fn parse(text: &str) -> Result<Self, SpecError> {
        let mut definitions = Vec::default();
        let mut aliases = HashMap::default();
        let mut keys = HashSet::new();
        let mut positionals = Vec::default();

        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let definition = parse_line(line).map_err(|reason| SpecError::new(i + 1, line, reason))?;
            let index = definitions.len();

            for name in definition.names() {
                if aliases.insert(name.clone(), index).is_some() {
                    return Err(SpecError::new(
                        i + 1,
                        line,
                        Malformed::DuplicateName(name.clone()),
                    ));
                }
            }

            let key = definition.key();
            if !keys.insert(key.clone()) {
                return Err(SpecError::new(i + 1, line, Malformed::DuplicateKey(key)));
            }

            if definition.kind() == OptionKind::Positional {
                positionals.push(index);
            }

            definitions.push(definition);
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Parsed {} options ({} positional).",
                definitions.len(),
                positionals.len()
            );
        }

        Ok(Self {
            definitions,
            aliases,
            positionals,
        })
    }

    /// The options, in declaration order.
    pub fn definitions(&self) -> &[OptionDef] {
        &self.definitions
    }

    /// Find the option invoked by the exact (case-sensitive) alias.
    pub fn lookup(&self, alias: &str) -> Option<&OptionDef> {
        self.aliases
            .get(alias)
            .map(|index| &self.definitions[*index])
    }

    pub(crate) fn index_of(&self, alias: &str) -> Option<usize> {
        self.aliases.get(alias).copied()
    }

    pub(crate) fn positionals(&self) -> &[usize] {
        &self.positionals
    }

    /// Resolve the tokens against this specification.
    ///
    /// `--help`/`-h` anywhere in the tokens yields [`ParseOutcome::HelpRequested`], ahead of any other error.
    /// Otherwise the first problem encountered yields [`ParseOutcome::Failure`].
    pub fn resolve(&self, tokens: &[&str], settings: &ParseSettings) -> ParseOutcome {
        match Parser::new(self, settings.ignore_unknown).consume(tokens) {
            Ok(Action::Continue(resolved)) => ParseOutcome::Success(resolved),
            Ok(Action::PrintHelp) => ParseOutcome::HelpRequested(
                Printer::new(self, settings.terminal_width)
                    .render_help(&settings.program)
                    .join("\n"),
            ),
            Err(failure) => ParseOutcome::Failure(failure),
        }
    }

    /// Build a [`GeneralParser`] that prints help and errors to the console.
    ///
    /// Unless set explicitly, the help layout follows the terminal width.
    pub fn build(&self, settings: ParseSettings) -> GeneralParser<'_> {
        self.build_with_interface(settings, Box::new(ConsoleInterface::default()))
    }

    /// Build a [`GeneralParser`] that prints help and errors through the `user_interface`.
    pub fn build_with_interface(
        &self,
        settings: ParseSettings,
        user_interface: Box<dyn UserInterface>,
    ) -> GeneralParser<'_> {
        GeneralParser::new(self, settings.detect_terminal_width(), user_interface)
    }
}

/// Per-invocation parse configuration.
///
/// ### Example
/// ```
/// # use bash_std_engine as bash_std;
/// use bash_std::ParseSettings;
///
/// let settings = ParseSettings::default()
///     .program("backup")
///     .ignore_unknown(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSettings {
    pub(crate) program: String,
    pub(crate) ignore_unknown: bool,
    pub(crate) terminal_width: Option<usize>,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            ignore_unknown: false,
            terminal_width: None,
        }
    }
}

impl ParseSettings {
    /// The program name shown in the help usage line.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Drop unrecognised tokens instead of failing on them.
    pub fn ignore_unknown(mut self, ignore_unknown: bool) -> Self {
        self.ignore_unknown = ignore_unknown;
        self
    }

    /// Lay out the help message for a terminal of this width.
    /// Without a width, the help message uses a narrow fixed layout.
    pub fn terminal_width(mut self, terminal_width: Option<usize>) -> Self {
        self.terminal_width = terminal_width;
        self
    }

    fn detect_terminal_width(self) -> Self {
        if self.terminal_width.is_some() {
            self
        } else {
            let terminal_width = Printer::terminal_width();
            self.terminal_width(terminal_width)
        }
    }
}
