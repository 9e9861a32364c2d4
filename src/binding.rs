use std::borrow::Cow;

use bash_std_engine::{ErrorContext, ParseFailure, ResolvedOptions, UserInterface};
use shell_escape::unix::escape;
use thiserror::Error;

/// The shell binding could not be configured.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingError {
    /// The prefix would not produce valid shell variable names.
    #[error("Binding error: prefix '{0}' must start with a letter or '_', and contain only ASCII letters, digits, and '_'.")]
    InvalidPrefix(String),
}

/// Renders resolved options as `eval`-safe shell variable assignments.
///
/// ### Example
/// ```
/// use bash_std::{ParseOutcome, ParseSettings, ShellBinding, Spec};
///
/// let spec = Spec::parse("--message,-m=<text>; default=hello; Greeting").unwrap();
/// let binding = ShellBinding::new("options_").unwrap();
///
/// match spec.resolve(&["-m", "it's me"], &ParseSettings::default()) {
///     ParseOutcome::Success(resolved) => {
///         assert_eq!(binding.render(&resolved), vec![r#"options_message='it'\''s me'"#]);
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellBinding {
    prefix: String,
}

impl ShellBinding {
    /// Bind the variables under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Result<Self, BindingError> {
        let prefix = prefix.into();
        let mut characters = prefix.chars();
        let valid = match characters.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && characters.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };

        if valid {
            Ok(Self { prefix })
        } else {
            Err(BindingError::InvalidPrefix(prefix))
        }
    }

    /// One `<prefix><key>=<value>` line per resolved option, in declaration order.
    pub fn render(&self, resolved: &ResolvedOptions) -> Vec<String> {
        resolved
            .iter()
            .map(|(key, value)| format!("{}{key}={}", self.prefix, escape(Cow::Borrowed(value))))
            .collect()
    }
}

/// A shell snippet which prints the `line` verbatim.
pub fn print_snippet(line: &str) -> String {
    format!("printf '%s\\n' {}", escape(Cow::Borrowed(line)))
}

/// Prints help as an `eval`-able snippet on stdout, and errors to stderr.
#[derive(Debug, Default)]
pub struct ShellInterface {}

impl UserInterface for ShellInterface {
    fn print(&self, message: String) {
        println!("{}", print_snippet(&message));
    }

    fn print_error(&self, error: ParseFailure) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bash_std_engine::{ParseOutcome, ParseSettings, Spec};
    use rstest::rstest;

    fn resolve(spec: &str, tokens: &[&str]) -> ResolvedOptions {
        let spec = Spec::parse(spec).unwrap();
        match spec.resolve(tokens, &ParseSettings::default()) {
            ParseOutcome::Success(resolved) => resolved,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[rstest]
    #[case("options_")]
    #[case("_")]
    #[case("backup")]
    #[case("Opt_2_")]
    fn binding_prefix(#[case] prefix: &str) {
        assert!(ShellBinding::new(prefix).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("2fa_")]
    #[case("options-")]
    #[case("opt ions")]
    #[case("$x")]
    #[case("é_")]
    fn binding_prefix_invalid(#[case] prefix: &str) {
        assert_eq!(
            ShellBinding::new(prefix).unwrap_err(),
            BindingError::InvalidPrefix(prefix.to_string())
        );
    }

    #[test]
    fn binding_render() {
        // Setup
        let resolved = resolve(
            "--verbose,-v; More output\n--mode=<mode>; Processing mode\ninput-file; Input",
            &["in.txt", "--mode=fast"],
        );
        let binding = ShellBinding::new("options_").unwrap();

        // Execute
        let lines = binding.render(&resolved);

        // Verify
        assert_eq!(
            lines,
            vec![
                "options_verbose=0".to_string(),
                "options_mode=fast".to_string(),
                "options_input_file=in.txt".to_string(),
            ]
        );
    }

    #[rstest]
    #[case("two words", "options_mode='two words'")]
    #[case("it's", r#"options_mode='it'\''s'"#)]
    #[case("$(rm -rf /)", "options_mode='$(rm -rf /)'")]
    #[case("", "options_mode=''")]
    fn binding_render_quoted(#[case] value: &str, #[case] expected: &str) {
        let resolved = resolve("--mode=<mode>; Processing mode", &["--mode", value]);
        let binding = ShellBinding::new("options_").unwrap();
        assert_eq!(binding.render(&resolved), vec![expected.to_string()]);
    }

    #[test]
    fn binding_render_empty() {
        let resolved = resolve("", &[]);
        let binding = ShellBinding::new("options_").unwrap();
        assert!(binding.render(&resolved).is_empty());
    }

    #[rstest]
    #[case("options", "printf '%s\\n' options")]
    #[case("", "printf '%s\\n' ''")]
    #[case(" -h, --help   Show", "printf '%s\\n' ' -h, --help   Show'")]
    fn print_snippet_quoted(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(print_snippet(line), expected);
    }
}
