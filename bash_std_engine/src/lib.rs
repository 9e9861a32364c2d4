//! Engine module for `bash_std`.
//!
//! Parses a compact option specification (one line per flag, value option, or positional) and resolves
//! invocation tokens against it.
//! See the `bash_std` crate root for the full grammar and the shell calling convention.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;

pub use api::*;
pub use model::*;
pub use parser::{ConsoleInterface, ErrorContext, GeneralParser, UserInterface};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
