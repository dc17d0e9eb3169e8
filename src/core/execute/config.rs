use crate::core::verbs;
use derivative::Derivative;
use std::path::PathBuf;

/// The ignore file looked up in the root directory by default
pub const DEFAULT_IGNORE_FILE: &str = ".clang-format-ignore";
/// The formatter executable used by default
pub const DEFAULT_FORMATTER: &str = "clang-format";
/// Extensions of the files formatted by default
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["cpp", "h", "hlsl"];
/// Edit in place, treat warnings as errors, print the files being formatted
pub const DEFAULT_FORMATTER_ARGS: [&str; 3] = ["-i", "--Werror", "--verbose"];

/// Config for running fmtwalk
///
/// Use this to configure fmtwalk when calling it from the library
/// # Example
/// ```no_run
/// use fmtwalk::{Fmtwalk, Config, Mode};
///
/// // Use the default config
/// let mut cfg = Config::default();
/// // Only list what would be formatted
/// cfg.mode = Mode::List;
/// let summary = Fmtwalk::run(cfg).unwrap();
/// for unit in summary.units {
///     println!("{}", unit.pattern());
/// }
/// ```
#[derive(Derivative, Clone)]
#[derivative(Debug, Default)]
pub struct Config {
    /// The root directory to walk. This is usually the current directory.
    ///
    /// The formatter also runs from this directory.
    #[derivative(Default(value = "PathBuf::from(\".\")"))]
    pub root_dir: PathBuf,
    /// The ignore file, relative to the root directory if not absolute. It must exist.
    #[derivative(Default(value = "PathBuf::from(DEFAULT_IGNORE_FILE)"))]
    pub ignore_file: PathBuf,
    /// Extensions of the files to format, with or without the leading `.`
    #[derivative(Default(value = "to_strings(&DEFAULT_EXTENSIONS)"))]
    pub extensions: Vec<String>,
    /// The formatter command (e.g. `clang-format`). Whitespace separated arguments are allowed
    #[derivative(Default(value = "DEFAULT_FORMATTER.to_string()"))]
    pub formatter_cmd: String,
    /// Arguments passed to the formatter before the targets
    #[derivative(Default(value = "to_strings(&DEFAULT_FORMATTER_ARGS)"))]
    pub formatter_args: Vec<String>,
    /// How the files of a unit are passed to the formatter. See [`TargetStyle`]
    pub target_style: TargetStyle,
    /// The mode. See [`Mode`]
    pub mode: Mode,
    /// The verbosity. See [`Verbosity`]
    pub verbosity: Verbosity,
}

fn to_strings(s: &[&str]) -> Vec<String> {
    s.iter().map(|x| x.to_string()).collect()
}

/// The verbosity config options
#[derive(Derivative, PartialEq, Clone)]
#[derivative(Debug, Default)]
pub enum Verbosity {
    Quiet,
    #[derivative(Default)]
    Normal,
    Verbose,
}

/// The mode config options
#[derive(Derivative, PartialEq, Clone)]
#[derivative(Debug, Default)]
pub enum Mode {
    /// Run the formatter on every unit
    ///
    /// This is the default mode. A unit that fails to format is reported
    /// and the run moves on to the next one.
    #[derivative(Default)]
    Format,
    /// Only find the units
    ///
    /// The formatter is not resolved or executed.
    List,
}

impl Mode {
    /// The verb shown in front of the unit counter
    pub fn counter_verb(&self) -> &'static str {
        match self {
            Self::Format => verbs::FORMATTED,
            Self::List => verbs::FOUND,
        }
    }
}

/// How the files of one unit are given to the formatter
#[derive(Derivative, PartialEq, Clone)]
#[derivative(Debug, Default)]
pub enum TargetStyle {
    /// Each matching file as its own argument, like `./dir/a.cpp ./dir/b.cpp`
    #[derivative(Default)]
    Files,
    /// A single `./dir/*.cpp` argument, for formatters that expand wildcards themselves
    Pattern,
}
