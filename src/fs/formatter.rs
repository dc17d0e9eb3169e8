//! Utilities for running the external formatter

use error_stack::{IntoReport, Report, Result};
use std::error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter as FmtFormatter};
use std::path::{Path, PathBuf};
use std::process::Command;
use which::which;

/// Error related to the formatter
#[derive(Debug)]
pub enum FormatterError {
    ResolveError,
    ExecuteError,
}

impl std::fmt::Display for FormatterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatterError::ResolveError => write!(f, "Error resolving formatter executable"),
            FormatterError::ExecuteError => write!(f, "Error executing formatter"),
        }
    }
}

impl error::Error for FormatterError {}

/// Representation of a resolved formatter command like `clang-format -i --Werror`.
///
/// The targets are appended to the arguments on each run.
#[derive(Debug)]
pub struct Formatter {
    /// The formatter executable
    exe: String,
    /// The name as given in the command, used in messages
    name: String,
    /// The arguments of the formatter, before the targets
    args: Vec<String>,
}

impl Display for Formatter {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> std::fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.exe)
        } else {
            write!(f, "{} {}", self.exe, self.args.join(" "))
        }
    }
}

/// Captured result of one failed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterFailure {
    /// Exit code as a string, or `unknown` if terminated by signal
    pub exit_code: String,
    /// Stderr, or stdout if stderr is empty, trimmed
    pub message: String,
}

impl Formatter {
    /// Create a new formatter from the command and the extra arguments
    ///
    /// The command is split on whitespace. The first part is the executable,
    /// the rest are placed before `extra_args`.
    pub fn new(cmd: &str, extra_args: &[String]) -> Result<Self, FormatterError> {
        let mut parts = cmd.split_whitespace();
        let name = match parts.next() {
            None => {
                return Err(Report::new(FormatterError::ResolveError)
                    .attach_printable("formatter command is empty"))
            }
            Some(name) => name,
        };
        let exe = resolve_formatter(name)?.display().to_string();
        let args = parts
            .map(String::from)
            .chain(extra_args.iter().cloned())
            .collect::<Vec<_>>();

        Ok(Self {
            exe,
            name: name.to_string(),
            args,
        })
    }

    /// The name of the formatter as given in the command
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the formatter on the targets in the directory. Return the stdout.
    ///
    /// Failing to spawn the process and a non-zero exit are both errors.
    /// The latter carries a [`FormatterFailure`] attachment.
    pub fn run<P>(&self, targets: &[OsString], work_dir: &P) -> Result<String, FormatterError>
    where
        P: AsRef<Path>,
    {
        log::debug!(
            "formatter command `{self} {}`",
            targets
                .iter()
                .map(|t| t.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );
        let result = Command::new(&self.exe)
            .current_dir(work_dir)
            .args(&self.args)
            .args(targets)
            .output()
            .into_report()
            .map_err(|e| {
                e.change_context(FormatterError::ExecuteError)
                    .attach_printable(format!("Failed to execute `{self}`"))
            })?;
        if result.status.success() {
            let output = String::from_utf8_lossy(&result.stdout).to_string();
            log::debug!("formatter output `{output}`");
            Ok(output)
        } else {
            let exit_code = match result.status.code() {
                Some(code) => code.to_string(),
                None => "unknown".to_string(),
            };
            let failure = FormatterFailure {
                message: capture_message(&result.stderr, &result.stdout),
                exit_code,
            };
            Err(Report::new(FormatterError::ExecuteError)
                .attach_printable(format!(
                    "`{}` failed with exit code {}",
                    self.name, failure.exit_code
                ))
                .attach(failure))
        }
    }
}

/// Prefer stderr, fall back to stdout when stderr has nothing to say
fn capture_message(stderr: &[u8], stdout: &[u8]) -> String {
    let err = String::from_utf8_lossy(stderr);
    let err = err.trim();
    if !err.is_empty() {
        return err.to_string();
    }
    String::from_utf8_lossy(stdout).trim().to_string()
}

/// Look up the executable on `PATH`, or take it as a path if it is not found there.
///
/// The path is not canonicalized, since multi-call binaries dispatch on their name.
fn resolve_formatter(exe: &str) -> Result<PathBuf, FormatterError> {
    let p = which(exe).unwrap_or_else(|_| Path::new(exe).to_path_buf());
    if !p.is_file() {
        return Err(Report::new(FormatterError::ResolveError)
            .attach_printable(format!("could not resolve formatter executable: {}", p.display())));
    }
    Ok(p)
}
