use std::collections::VecDeque;

use crate::api::Spec;
use crate::constant::*;
use crate::matcher::model::*;
use crate::model::{OptionKind, ResolvedOptions};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
pub(crate) struct TokenMatcher<'s> {
    spec: &'s Spec,
    ignore_unknown: bool,
    positionals: VecDeque<usize>,
    fed: usize,
    values: Vec<Option<String>>,
    // A value option still waiting on its value (the next token).
    buffer: Option<usize>,
}

impl<'s> TokenMatcher<'s> {
    pub(crate) fn new(spec: &'s Spec, ignore_unknown: bool) -> Self {
        Self {
            spec,
            ignore_unknown,
            positionals: spec.positionals().iter().copied().collect(),
            fed: 0,
            values: vec![None; spec.definitions().len()],
            buffer: None,
        }
    }

    pub(crate) fn feed(&mut self, token: &str) -> Result<(), MatchError> {
        let token_length = token.len();
        // 1. Complete a pending value option, such as:
        //  --output ..
        //  -o ..
        // 2. Find an option, such as:
        //  --verbose
        //  --output=..
        //  -o=..
        // 3. Match against the next positional.
        let result = if let Some(index) = self.buffer.take() {
            self.capture(index, token);
            Ok(())
        } else if token.starts_with('-') {
            self.match_option(token)
        } else {
            self.match_argument(token)
        };

        self.fed += token_length;
        result
    }

    fn match_option(&mut self, token: &str) -> Result<(), MatchError> {
        let (name, inline_value) = split_equals_delimiter(token);

        let Some(index) = self.spec.index_of(name) else {
            return self.unrecognised(MatchError::UnrecognisedOption(name.to_string()));
        };

        match (self.spec.definitions()[index].kind(), inline_value) {
            (OptionKind::Flag, None) => {
                self.capture(index, FLAG_SET);
                Ok(())
            }
            (OptionKind::Flag, Some(_)) => Err(MatchError::UnexpectedValue(name.to_string())),
            (OptionKind::Value, Some(value)) => {
                self.capture(index, value);
                Ok(())
            }
            (OptionKind::Value, None) => {
                if self.buffer.replace(index).is_some() {
                    unreachable!("internal error - the buffer is expected to be None");
                }

                Ok(())
            }
            (OptionKind::Positional, _) => {
                unreachable!("internal error - positional names never start with '-'")
            }
        }
    }

    fn match_argument(&mut self, token: &str) -> Result<(), MatchError> {
        match self.positionals.pop_front() {
            Some(index) => {
                self.capture(index, token);
                Ok(())
            }
            None => self.unrecognised(MatchError::ArgumentsExhausted(token.to_string())),
        }
    }

    fn capture(&mut self, index: usize, value: &str) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Matched '{}' at offset {}.",
                self.spec.definitions()[index].name(),
                self.fed
            );
        }

        // Repeats overwrite, so the last occurrence wins.
        self.values[index] = Some(value.to_string());
    }

    fn unrecognised(&self, error: MatchError) -> Result<(), MatchError> {
        if self.ignore_unknown {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Ignoring at offset {}: {error}", self.fed);
            }

            Ok(())
        } else {
            Err(error)
        }
    }

    pub(crate) fn close(self) -> Result<ResolvedOptions, (usize, MatchError)> {
        if let Some(index) = self.buffer {
            let name = self.spec.definitions()[index].name().to_string();
            return Err((self.fed, MatchError::MissingValue(name)));
        }

        let mut resolved = ResolvedOptions::default();

        for (definition, value) in self.spec.definitions().iter().zip(self.values) {
            let value = match (value, definition.kind(), definition.default()) {
                (Some(value), _, _) => value,
                (None, OptionKind::Flag, _) => FLAG_UNSET.to_string(),
                (None, _, Some(default)) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Defaulting '{}' to '{default}'.", definition.name());
                    }

                    default.to_string()
                }
                (None, _, None) => {
                    return Err((
                        self.fed,
                        MatchError::MissingRequired(definition.name().to_string()),
                    ));
                }
            };

            resolved.insert(definition.key(), value);
        }

        Ok(resolved)
    }
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once(VALUE_DELIMITER) {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}
