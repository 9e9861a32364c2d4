use std::env;

use crate::api::{ParseSettings, Spec};
use crate::model::ResolvedOptions;
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;
use crate::parser::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The configured command line parser.
/// Built via `Spec::build` or `Spec::build_with_interface`.
pub struct GeneralParser<'s> {
    spec: &'s Spec,
    settings: ParseSettings,
    user_interface: Box<dyn UserInterface>,
}

impl<'s> std::fmt::Debug for GeneralParser<'s> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralParser")
            .field("settings", &self.settings)
            .finish()
    }
}

impl<'s> GeneralParser<'s> {
    pub(crate) fn new(
        spec: &'s Spec,
        settings: ParseSettings,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            spec,
            settings,
            user_interface,
        }
    }

    /// Resolve the tokens, printing help and errors through the user interface.
    ///
    /// `--help`/`-h` anywhere prints the help message, and returns `Err(0)`.
    /// Otherwise the first problem (ex: unrecognised token, missing value, missing required parameter) is printed along with its error context, and returns `Err(1)`.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<ResolvedOptions, i32> {
        let parser = Parser::new(self.spec, self.settings.ignore_unknown);

        match parser.consume(tokens) {
            Ok(Action::Continue(resolved)) => Ok(resolved),
            Ok(Action::PrintHelp) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Help requested for '{}'.", self.settings.program);
                }

                Printer::new(self.spec, self.settings.terminal_width)
                    .print_help(&self.settings.program, &*self.user_interface);
                Err(0)
            }
            Err(failure) => {
                let offset = failure.offset();
                self.user_interface.print_error(failure);
                self.user_interface
                    .print_error_context(ErrorContext::new(offset, tokens));
                Err(1)
            }
        }
    }

    /// Run the command line parser against the process arguments ([`env::args`], less the program).
    ///
    /// Exits the process (via `std::process::exit`) where `parse_tokens` would return `Err`.
    ///
    /// ### Example
    /// ```no_run
    /// # use bash_std_engine as bash_std;
    /// use bash_std::{ParseSettings, Spec};
    ///
    /// let spec = Spec::parse("--verbose,-v; More output\nfile; The input file").unwrap();
    /// let resolved = spec.build(ParseSettings::default().program("tool")).parse();
    /// println!("verbose={}", resolved.get("verbose").unwrap_or("0"));
    /// ```
    pub fn parse(self) -> ResolvedOptions {
        let arguments: Vec<String> = env::args().skip(1).collect();
        let tokens: Vec<&str> = arguments.iter().map(String::as_str).collect();
        self.parse_tokens(&tokens)
            .unwrap_or_else(|exit_code| std::process::exit(exit_code))
    }
}
