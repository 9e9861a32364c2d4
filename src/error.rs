use bash_std_engine::SpecError;
use thiserror::Error;

use crate::binding::BindingError;

/// Exit status for a malformed specification, unreadable input, or misconfiguration.
pub const USAGE_EXIT_CODE: i32 = 2;

/// A problem with the `bash-std` invocation itself, rather than the script's arguments.
#[derive(Debug, Error)]
pub enum CliError {
    /// The option specification was malformed.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// The shell binding was misconfigured.
    #[error(transparent)]
    Binding(#[from] BindingError),

    /// The option specification could not be read.
    #[error("Input error: unable to read the option specification from stdin: {0}")]
    Input(#[from] std::io::Error),
}

impl CliError {
    /// The process exit status to report.
    pub fn exit_code(&self) -> i32 {
        USAGE_EXIT_CODE
    }
}
