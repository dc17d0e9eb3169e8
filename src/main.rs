use clap::Parser;
use fmtwalk::{fmtwalk, Config, Mode, TargetStyle, Verbosity};
use std::path::PathBuf;
use std::process::ExitCode;

/// Run a code formatter over every directory of a source tree.
///
/// The formatter is invoked once per directory and extension, for directories
/// not excluded by the ignore file.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Root directory to walk. The formatter also runs from here
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Ignore file with one glob pattern per line, relative to the root. Must exist
    #[arg(short = 'I', long, default_value = fmtwalk::DEFAULT_IGNORE_FILE)]
    ignore_file: PathBuf,

    /// Extension of the files to format. Can be repeated [default: cpp h hlsl]
    #[arg(short, long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Formatter command. May include arguments
    #[arg(short, long, default_value = fmtwalk::DEFAULT_FORMATTER)]
    formatter: String,

    /// Argument passed to the formatter before the targets. Can be repeated [default: -i --Werror --verbose]
    #[arg(short = 'a', long = "formatter-arg", value_name = "ARG", allow_hyphen_values = true)]
    formatter_args: Vec<String>,

    /// Pass one `./dir/*.ext` glob per unit instead of the file list
    #[arg(long)]
    pattern: bool,

    /// Only list the units that would be formatted
    #[arg(short, long)]
    list: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Also print ignored directories
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let mut config = Config {
            root_dir: cli.root,
            ignore_file: cli.ignore_file,
            formatter_cmd: cli.formatter,
            ..Default::default()
        };
        if !cli.extensions.is_empty() {
            config.extensions = cli.extensions;
        }
        if !cli.formatter_args.is_empty() {
            config.formatter_args = cli.formatter_args;
        }
        if cli.pattern {
            config.target_style = TargetStyle::Pattern;
        }
        if cli.list {
            config.mode = Mode::List;
        }
        config.verbosity = if cli.quiet {
            Verbosity::Quiet
        } else if cli.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        config
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let list = cli.list;
    match fmtwalk(cli.into()) {
        Ok(summary) => {
            if list {
                for unit in summary.units {
                    println!("{}", unit.pattern());
                }
            }
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}
