//! `bash_std` is a declarative option parser for bash scripts.
//!
//! A script describes its options in a compact specification, one line per option.
//! `bash_std` resolves the script's arguments against the specification, and emits the results as shell variables.
//! Help output, error diagnostics, and exit statuses come for free.
//!
//! # Usage
//! From bash, via the `bash-std` binary:
//! ```console
//! OPTIONS='
//! --verbose,-v; More output
//! --output,-o=<path>; default=/dev/stdout; Output file path
//! --mode=<mode>; Processing mode
//! '
//! eval "$(bash-std "$@" <<< "$OPTIONS")"
//! echo "mode: $options_mode, verbose: $options_verbose"
//! ```
//!
//! ```console
//! $ backup.sh --mode=fast -v
//! mode: fast, verbose: 1
//!
//! $ backup.sh -v
//! Parse error: Missing required parameter '--mode'.
//! -v
//!   ^
//! ```
//!
//! Or from Rust:
//! ```
//! use bash_std::{ParseOutcome, ParseSettings, Spec};
//!
//! let spec = Spec::parse("\
//! --verbose,-v; More output
//! --output,-o=<path>; default=/dev/stdout; Output file path
//! --mode=<mode>; Processing mode
//! ").unwrap();
//!
//! match spec.resolve(&["--mode", "fast"], &ParseSettings::default()) {
//!     ParseOutcome::Success(resolved) => {
//!         assert_eq!(resolved.get("verbose"), Some("0"));
//!         assert_eq!(resolved.get("output"), Some("/dev/stdout"));
//!         assert_eq!(resolved.get("mode"), Some("fast"));
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! # Specification Grammar
//! Each non-blank line declares one option:
//! ```text
//! <names>[=<placeholder>]; [default=<value>;] <help text>
//! ```
//! * `<names>` is a comma separated list of aliases.
//! `--name` is a long name, `-n` is a short name, and a name without dashes declares a positional argument.
//! * `=<placeholder>` declares a value option; without it, a dashed option is a flag.
//! The placeholder only appears in the help message.
//! * `default=<value>;` makes the option optional.
//! Value options and positionals without a default are required.
//! Flags are never required; they resolve to `1` when present and `0` otherwise.
//! * The remaining text is the help message.
//!
//! Each option resolves under its canonical key: the first name, with leading dashes removed and `-` replaced by `_`.
//! For example, `--dry-run,-n` resolves under `dry_run`, and is bound to the shell variable `options_dry_run`.
//!
//! # Cli Semantics
//! * `--help` or `-h` anywhere prints the help message and exits with `0`, regardless of the other tokens.
//! * Value options accept `--name=value`, `-n=value`, `--name value`, and `-n value`.
//! In the separated form the next token is taken verbatim, even when it starts with `-`.
//! * Flags do not accept a value; `--verbose=1` is an error.
//! * Bare tokens fill the positionals in declaration order, and may be interleaved with options.
//! * When an option is repeated, the last occurrence wins.
//! * Unrecognised tokens are an error, unless `BASH_STD_IGNORE_UNKNOWN_ARGS=1` in which case they are dropped.
//!
//! # Environment
//! * `BASH_STD_IGNORE_UNKNOWN_ARGS`: `1` drops unrecognised tokens.
//! * `BASH_STD_PREFIX`: the shell variable prefix (default `options_`).
//! * `BASH_STD_PROGRAM`: the program name in the help usage line.
//!
//! # Features
//! * `tracing_debug`: Debug logging (to stderr) of the specification, settings, and matching decisions.
mod binding;
mod config;
mod error;
#[cfg(feature = "tracing_debug")]
pub mod logger;

pub use bash_std_engine::*;
pub use binding::{print_snippet, BindingError, ShellBinding, ShellInterface};
pub use config::*;
pub use error::{CliError, USAGE_EXIT_CODE};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// What the calling shell should `eval`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// The arguments resolved; bind these variable assignments.
    Bind(Vec<String>),
    /// Stop the script with this exit status (help was shown, or the arguments were rejected).
    Exit(i32),
}

impl Evaluation {
    /// The lines to print to stdout, following anything the user interface already printed.
    pub fn script(&self) -> Vec<String> {
        match self {
            Evaluation::Bind(lines) => lines.clone(),
            Evaluation::Exit(code) => vec![format!("exit {code}")],
        }
    }

    /// The exit status of the `bash-std` process.
    pub fn exit_code(&self) -> i32 {
        match self {
            Evaluation::Bind(_) => 0,
            Evaluation::Exit(code) => *code,
        }
    }
}

/// Resolve the `tokens` against the `spec_text`, and prepare the shell output.
///
/// Help and error messages are printed through the `user_interface`.
pub fn evaluate(
    spec_text: &str,
    tokens: &[&str],
    settings: &Settings,
    program: &str,
    user_interface: Box<dyn UserInterface>,
) -> Result<Evaluation, CliError> {
    let spec = Spec::parse(spec_text)?;
    let binding = ShellBinding::new(settings.prefix())?;
    let parser = spec.build_with_interface(settings.parse_settings(program), user_interface);

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Resolving {} tokens against {} options.", tokens.len(), spec.definitions().len());
    }

    match parser.parse_tokens(tokens) {
        Ok(resolved) => Ok(Evaluation::Bind(binding.render(&resolved))),
        Err(exit_code) => Ok(Evaluation::Exit(exit_code)),
    }
}
