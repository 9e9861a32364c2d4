use std::env;

use bash_std_engine::ParseSettings;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Set to `1` to drop unrecognised tokens instead of failing on them.
pub const IGNORE_UNKNOWN_VARIABLE: &str = "BASH_STD_IGNORE_UNKNOWN_ARGS";
/// Overrides the namespace prefix of the emitted shell variables.
pub const PREFIX_VARIABLE: &str = "BASH_STD_PREFIX";
/// Overrides the program name shown in the help usage line.
pub const PROGRAM_VARIABLE: &str = "BASH_STD_PROGRAM";
/// The namespace prefix used when [`PREFIX_VARIABLE`] is unset.
pub const DEFAULT_PREFIX: &str = "options_";

const ENABLED: &str = "1";

/// The process-level configuration of `bash-std`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    ignore_unknown: bool,
    prefix: String,
    program: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ignore_unknown: false,
            prefix: DEFAULT_PREFIX.to_string(),
            program: None,
        }
    }
}

impl Settings {
    /// Read the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the settings through `lookup`, which maps a variable name to its value (if set).
    ///
    /// ### Example
    /// ```
    /// use bash_std::Settings;
    ///
    /// let settings = Settings::from_lookup(|name| match name {
    ///     "BASH_STD_IGNORE_UNKNOWN_ARGS" => Some("1".to_string()),
    ///     _ => None,
    /// });
    /// assert!(settings.ignore_unknown());
    /// assert_eq!(settings.prefix(), "options_");
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let ignore_unknown = lookup(IGNORE_UNKNOWN_VARIABLE).as_deref() == Some(ENABLED);
        let prefix = lookup(PREFIX_VARIABLE).unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let program = lookup(PROGRAM_VARIABLE).filter(|program| !program.is_empty());

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Settings: ignore_unknown={ignore_unknown}, prefix='{prefix}', program={program:?}.");
        }

        Self {
            ignore_unknown,
            prefix,
            program,
        }
    }

    /// Whether unrecognised tokens are dropped.
    pub fn ignore_unknown(&self) -> bool {
        self.ignore_unknown
    }

    /// The namespace prefix of the emitted shell variables.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The configured program name, if any.
    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    /// The engine settings for one invocation, naming the program `fallback_program` unless configured otherwise.
    pub fn parse_settings(&self, fallback_program: &str) -> ParseSettings {
        ParseSettings::default()
            .program(self.program().unwrap_or(fallback_program))
            .ignore_unknown(self.ignore_unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let variables: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| variables.get(name).cloned()
    }

    #[test]
    fn settings_unset() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings, Settings::default());
        assert!(!settings.ignore_unknown());
        assert_eq!(settings.prefix(), "options_");
        assert_eq!(settings.program(), None);
    }

    #[rstest]
    #[case("1", true)]
    #[case("0", false)]
    #[case("", false)]
    #[case("true", false)]
    #[case(" 1", false)]
    fn settings_ignore_unknown(#[case] value: &str, #[case] expected: bool) {
        let settings = Settings::from_lookup(lookup(&[(IGNORE_UNKNOWN_VARIABLE, value)]));
        assert_eq!(settings.ignore_unknown(), expected);
    }

    #[test]
    fn settings_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (PREFIX_VARIABLE, "backup_"),
            (PROGRAM_VARIABLE, "backup.sh"),
        ]));
        assert_eq!(settings.prefix(), "backup_");
        assert_eq!(settings.program(), Some("backup.sh"));
    }

    #[test]
    fn settings_empty_program() {
        let settings = Settings::from_lookup(lookup(&[(PROGRAM_VARIABLE, "")]));
        assert_eq!(settings.program(), None);
    }

    #[rstest]
    #[case(&[], "bash-std", "bash-std")]
    #[case(&[(PROGRAM_VARIABLE, "backup.sh")], "bash-std", "backup.sh")]
    fn settings_parse_settings(
        #[case] pairs: &[(&str, &str)],
        #[case] fallback: &str,
        #[case] expected: &str,
    ) {
        let settings = Settings::from_lookup(lookup(pairs));
        assert_eq!(
            settings.parse_settings(fallback),
            ParseSettings::default().program(expected)
        );
    }
}
