use crate::api::Spec;
use crate::constant::*;
use crate::matcher::TokenMatcher;
use crate::model::{ParseFailure, ResolvedOptions};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

pub(crate) struct Parser<'s> {
    spec: &'s Spec,
    ignore_unknown: bool,
}

impl<'s> std::fmt::Debug for Parser<'s> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser{..}").finish()
    }
}

impl<'s> Parser<'s> {
    pub(crate) fn new(spec: &'s Spec, ignore_unknown: bool) -> Self {
        Self {
            spec,
            ignore_unknown,
        }
    }

    pub(crate) fn consume(self, tokens: &[&str]) -> Result<Action, ParseFailure> {
        // 1. The help switch wins over everything else, wherever it appears.
        if tokens
            .iter()
            .any(|token| *token == HELP_NAME || *token == HELP_SHORT)
        {
            return Ok(Action::PrintHelp);
        }

        // 2. Feed the raw token strings to the matcher.
        let mut token_matcher = TokenMatcher::new(self.spec, self.ignore_unknown);
        let mut fed = 0;

        for token in tokens {
            token_matcher
                .feed(token)
                .map_err(|e| ParseFailure::from((fed, e)))?;
            fed += token.len();
        }

        // 3. Fill in the defaults, and check nothing required is missing.
        let resolved = token_matcher.close().map_err(ParseFailure::from)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Resolved {} values from {} tokens.", resolved.len(), tokens.len());
        }

        Ok(Action::Continue(resolved))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Continue(ResolvedOptions),
    PrintHelp,
}
