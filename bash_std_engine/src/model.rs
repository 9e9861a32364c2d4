use indexmap::IndexMap;
use thiserror::Error;

use crate::constant::*;

/// How an option is addressed on the Cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Boolean presence: `"1"` when supplied, `"0"` otherwise.
    Flag,
    /// Requires a value, via `--name=value`, `--name value`, `-n=value` or `-n value`.
    Value,
    /// Consumed by position, in declaration order.
    Positional,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One parsed line of the option specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDef {
    names: Vec<String>,
    kind: OptionKind,
    placeholder: Option<String>,
    default: Option<String>,
    help: String,
}

impl OptionDef {
    pub(crate) fn new(
        names: Vec<String>,
        kind: OptionKind,
        placeholder: Option<String>,
        default: Option<String>,
        help: impl Into<String>,
    ) -> Self {
        assert!(!names.is_empty(), "internal error - option must have a name");
        Self {
            names,
            kind,
            placeholder,
            default,
            help: help.into(),
        }
    }

    /// Every form this option may be invoked as, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The first (canonical) name, as declared.
    pub fn name(&self) -> &str {
        &self.names[0]
    }

    /// The option kind.
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// The documentation-only value hint, such as `<path>`.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// The value used when the option is never supplied.
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The help text.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// The result key: the canonical name with leading dashes stripped and `-` replaced by `_`.
    pub fn key(&self) -> String {
        canonical_key(self.name())
    }

    /// Whether resolution fails when the option is never supplied.
    pub fn is_required(&self) -> bool {
        self.kind != OptionKind::Flag && self.default.is_none()
    }
}

pub(crate) fn canonical_key(name: &str) -> String {
    name.trim_start_matches('-').replace('-', "_")
}

/// The resolved values, keyed by canonical key in declaration order.
///
/// Flags hold `"0"` or `"1"`; value options and positionals hold their string value verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    values: IndexMap<String, String>,
}

impl ResolvedOptions {
    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    /// Get the value bound to a canonical key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether the flag bound to a canonical key was supplied.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key) == Some(FLAG_SET)
    }

    /// Iterate the `(key, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The number of resolved values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no resolved values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ResolvedOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for ResolvedOptions {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// The class of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A dash token matching no option, or a bare token with no positional slot left.
    UnknownArgument,
    /// A value option at the end of the tokens, without an inline `=value`.
    MissingValue,
    /// An option without a default that was never supplied.
    MissingRequired,
    /// A flag supplied with an inline `=value`.
    UnexpectedValue,
}

/// A terminal failure for one invocation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Parse error: {message}")]
pub struct ParseFailure {
    kind: FailureKind,
    message: String,
    offset: usize,
}

impl ParseFailure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            offset,
        }
    }

    /// The failure class.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The offset into the concatenated tokens where the failure was detected.
    /// See [`crate::ErrorContext`].
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// The single result of resolving one set of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// All tokens matched and every required option has a value.
    Success(ResolvedOptions),
    /// Resolution stopped at the first problem.
    Failure(ParseFailure),
    /// `--help` or `-h` was present; holds the rendered help text.
    HelpRequested(String),
}

impl ParseOutcome {
    /// The process exit status this outcome maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            ParseOutcome::Success(_) | ParseOutcome::HelpRequested(_) => 0,
            ParseOutcome::Failure(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("--verbose", "verbose")]
    #[case("-v", "v")]
    #[case("--backup-directory", "backup_directory")]
    #[case("input-file", "input_file")]
    #[case("--a-b-c", "a_b_c")]
    #[case("plain", "plain")]
    fn key(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(canonical_key(name), expected);
    }

    #[rstest]
    #[case(OptionKind::Flag, None, false)]
    #[case(OptionKind::Flag, Some("x"), false)]
    #[case(OptionKind::Value, None, true)]
    #[case(OptionKind::Value, Some("x"), false)]
    #[case(OptionKind::Positional, None, true)]
    #[case(OptionKind::Positional, Some(""), false)]
    fn option_def_required(
        #[case] kind: OptionKind,
        #[case] default: Option<&str>,
        #[case] expected: bool,
    ) {
        let def = OptionDef::new(
            vec!["--name".to_string(), "-n".to_string()],
            kind,
            None,
            default.map(str::to_string),
            "",
        );
        assert_eq!(def.is_required(), expected);
        assert_eq!(def.name(), "--name");
        assert_eq!(def.key(), "name");
    }

    #[test]
    fn resolved_options_order() {
        let resolved: ResolvedOptions = vec![("b", "1"), ("a", "0"), ("c", "x")]
            .into_iter()
            .collect();

        assert_eq!(
            resolved.iter().collect::<Vec<_>>(),
            vec![("b", "1"), ("a", "0"), ("c", "x")]
        );
        assert!(resolved.is_set("b"));
        assert!(!resolved.is_set("a"));
        assert!(!resolved.is_set("c"));
        assert!(!resolved.is_set("missing"));
        assert_eq!(resolved.get("c"), Some("x"));
        assert_eq!(resolved.len(), 3);
    }

    #[test]
    fn resolved_options_overwrite() {
        let mut resolved = ResolvedOptions::default();
        assert!(resolved.is_empty());
        resolved.insert("a".to_string(), "first".to_string());
        resolved.insert("a".to_string(), "second".to_string());
        assert_eq!(resolved.get("a"), Some("second"));
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn outcome_exit_code() {
        assert_eq!(
            ParseOutcome::Success(ResolvedOptions::default()).exit_code(),
            0
        );
        assert_eq!(ParseOutcome::HelpRequested(String::default()).exit_code(), 0);
        assert_eq!(
            ParseOutcome::Failure(ParseFailure::new(FailureKind::MissingValue, "x", 0))
                .exit_code(),
            1
        );
    }

    #[test]
    fn failure_display() {
        let failure = ParseFailure::new(
            FailureKind::UnknownArgument,
            "Argument '--bogus' is unrecognised.",
            3,
        );
        assert_eq!(
            failure.to_string(),
            "Parse error: Argument '--bogus' is unrecognised."
        );
        assert_eq!(failure.offset(), 3);
        assert_eq!(failure.kind(), FailureKind::UnknownArgument);
    }
}
