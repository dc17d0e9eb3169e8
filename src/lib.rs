//! # fmtwalk
//! Run an external code formatter (`clang-format` by default) over a source tree,
//! one directory and one extension at a time, skipping what the ignore file excludes.
//!
//! # fmtwalk as a library
//! Build a [`Config`] and pass it to [`fmtwalk()`], which prints errors,
//! or to [`Fmtwalk::run`], which returns them along with the [`Summary`].
//!

mod core;
pub use crate::core::{
    fmtwalk, Config, ExecuteError, Fmtwalk, Mode, Summary, TargetStyle, Unit, UnitFailure,
    Verbosity, DEFAULT_EXTENSIONS, DEFAULT_FORMATTER, DEFAULT_FORMATTER_ARGS, DEFAULT_IGNORE_FILE,
};
pub mod error;
mod fs;
pub use crate::fs::{FormatterError, IgnoreRules};
