mod base;
mod interface;
mod middleware;
mod printer;

pub(crate) use base::{Action, Parser};
pub(crate) use interface::{ColumnLayout, MINIMUM_MIDDLE_WIDTH};
pub use interface::{ConsoleInterface, UserInterface};
pub use middleware::GeneralParser;
pub(crate) use printer::Printer;
pub use printer::ErrorContext;

#[cfg(test)]
pub(crate) use interface::util;
