//! Wrapper to perform file system operations
//!

mod path;
pub use path::*;

mod ignore;
pub use ignore::IgnoreRules;

mod formatter;
pub use formatter::{Formatter, FormatterError, FormatterFailure};
