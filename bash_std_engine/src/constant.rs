pub(crate) const HELP_NAME: &str = "--help";
pub(crate) const HELP_SHORT: &str = "-h";
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";

pub(crate) const FIELD_DELIMITER: char = ';';
pub(crate) const NAME_DELIMITER: char = ',';
pub(crate) const VALUE_DELIMITER: char = '=';
pub(crate) const DEFAULT_FIELD: &str = "default=";

pub(crate) const FLAG_UNSET: &str = "0";
pub(crate) const FLAG_SET: &str = "1";

pub(crate) const DEFAULT_PROGRAM: &str = "program";
