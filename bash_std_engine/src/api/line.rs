use thiserror::Error;

use crate::constant::*;
use crate::model::{OptionDef, OptionKind};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The reason a specification line was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Malformed {
    /// The line has no `;` between the names and the help text.
    #[error("missing the '{FIELD_DELIMITER}' separator.")]
    MissingSeparator,

    /// The names end with `=` but no placeholder follows.
    #[error("empty placeholder after '{VALUE_DELIMITER}'.")]
    EmptyPlaceholder,

    /// The name list contains an empty entry.
    #[error("empty name in the name list.")]
    EmptyName,

    /// A name is only dashes, has more than two leading dashes, or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid name '{0}'.")]
    InvalidName(String),

    /// Positional and dashed names appear on the same line.
    #[error("cannot mix positional and dashed names.")]
    MixedNames,

    /// `--help` or `-h` was declared.
    #[error("the name '{0}' is reserved for help.")]
    ReservedName(String),

    /// The same name is declared twice.
    #[error("cannot duplicate the name '{0}'.")]
    DuplicateName(String),

    /// Two options normalise to the same key.
    #[error("cannot duplicate the key '{0}'.")]
    DuplicateKey(String),
}

// Grammar:
//  <names>[=<placeholder>]; [default=<value>;] <help text>
pub(crate) fn parse_line(line: &str) -> Result<OptionDef, Malformed> {
    let (head, tail) = line
        .split_once(FIELD_DELIMITER)
        .ok_or(Malformed::MissingSeparator)?;
    let (names, placeholder) = match head.trim().split_once(VALUE_DELIMITER) {
        Some((names, placeholder)) => {
            let placeholder = placeholder.trim();

            if placeholder.is_empty() {
                return Err(Malformed::EmptyPlaceholder);
            }

            (names, Some(placeholder.to_string()))
        }
        None => (head.trim(), None),
    };
    let names = parse_names(names)?;
    let dashed = names.iter().filter(|name| name.starts_with('-')).count();
    let kind = if dashed == 0 {
        OptionKind::Positional
    } else if dashed < names.len() {
        return Err(Malformed::MixedNames);
    } else if placeholder.is_some() {
        OptionKind::Value
    } else {
        OptionKind::Flag
    };
    let (default, help) = parse_fields(tail);

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Parsed {kind} option {names:?} (placeholder={placeholder:?}, default={default:?}).");
    }

    Ok(OptionDef::new(names, kind, placeholder, default, help))
}

fn parse_names(names: &str) -> Result<Vec<String>, Malformed> {
    names
        .split(NAME_DELIMITER)
        .map(|name| {
            let name = name.trim();

            if name.is_empty() {
                return Err(Malformed::EmptyName);
            }

            let stripped = name.trim_start_matches('-');
            let dashes = name.len() - stripped.len();

            if stripped.is_empty()
                || dashes > 2
                || !stripped
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(Malformed::InvalidName(name.to_string()));
            }

            if name == HELP_NAME || name == HELP_SHORT {
                return Err(Malformed::ReservedName(name.to_string()));
            }

            Ok(name.to_string())
        })
        .collect()
}

// The default, when present, runs up to the next ';' (or the end of the line).
fn parse_fields(tail: &str) -> (Option<String>, String) {
    let tail = tail.trim_start();

    match tail.strip_prefix(DEFAULT_FIELD) {
        Some(rest) => {
            let (default, help) = rest.split_once(FIELD_DELIMITER).unwrap_or((rest, ""));
            (Some(default.trim().to_string()), help.trim().to_string())
        }
        None => (None, tail.trim().to_string()),
    }
}
