mod core;
mod line;

pub use self::core::*;
pub use line::Malformed;
