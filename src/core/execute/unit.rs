use crate::core::TargetStyle;
use crate::error::FmtwalkError;
use crate::fs::SourcePath;
use error_stack::{Report, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One (directory, extension) pair, formatted by a single formatter invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// The directory relative to the root
    pub dir: PathBuf,
    /// The extension, without the leading `.`
    pub ext: String,
    /// Names of the matching files directly inside the directory, sorted
    pub files: Vec<OsString>,
}

impl Unit {
    /// The directory relative to the root, `/` separated. For display and matching only
    pub fn rel_dir(&self) -> String {
        self.dir.to_slash()
    }

    /// The glob selecting the files of this unit, like `./dir/*.cpp`. For display only
    pub fn pattern(&self) -> String {
        format!("./{}/*.{}", self.rel_dir(), self.ext)
    }

    /// The arguments passed to the formatter for this unit, relative to the root
    ///
    /// File names are passed as they are on disk, even if they are not valid UTF-8.
    pub fn targets(&self, style: &TargetStyle) -> Vec<OsString> {
        let dir = Path::new(".").join(&self.dir);
        match style {
            TargetStyle::Pattern => vec![dir.join(format!("*.{}", self.ext)).into_os_string()],
            TargetStyle::Files => self
                .files
                .iter()
                .map(|f| dir.join(f).into_os_string())
                .collect(),
        }
    }
}

/// A unit the formatter failed on
#[derive(Debug, Clone)]
pub struct UnitFailure {
    pub unit: Unit,
    /// What the formatter said, or why it could not run
    pub message: String,
}

/// Result of a run
#[derive(Debug, Default)]
pub struct Summary {
    /// The units found, in the order they were processed
    pub units: Vec<Unit>,
    /// Directories skipped because of the ignore rules, relative to the root
    pub ignored: Vec<String>,
    pub failures: Vec<UnitFailure>,
}

impl Summary {
    /// If every unit was formatted
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn the failures into an error, one attachment per failed unit
    pub fn into_result(self) -> Result<Self, FmtwalkError> {
        if self.is_success() {
            return Ok(self);
        }
        let mut report = Report::new(FmtwalkError).attach_printable(format!(
            "{} of {} unit(s) failed to format",
            self.failures.len(),
            self.units.len()
        ));
        for failure in &self.failures {
            report = report.attach_printable(format!(
                "{}: {}",
                failure.unit.pattern(),
                failure.message
            ));
        }
        Err(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Unit {
        Unit {
            dir: ["Game", "RenderPasses"].iter().collect(),
            ext: "cpp".to_string(),
            files: vec!["Bloom.cpp".into(), "Tonemap.cpp".into()],
        }
    }

    #[test]
    fn pattern_selects_one_extension_in_one_dir() {
        assert_eq!(unit().rel_dir(), "Game/RenderPasses");
        assert_eq!(unit().pattern(), "./Game/RenderPasses/*.cpp");
    }

    #[cfg(unix)]
    #[test]
    fn targets_are_relative_to_the_root() {
        assert_eq!(
            unit().targets(&TargetStyle::Pattern),
            vec![OsString::from("./Game/RenderPasses/*.cpp")]
        );
        assert_eq!(
            unit().targets(&TargetStyle::Files),
            vec![
                OsString::from("./Game/RenderPasses/Bloom.cpp"),
                OsString::from("./Game/RenderPasses/Tonemap.cpp")
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn file_targets_keep_raw_bytes() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};
        let name = std::ffi::OsStr::from_bytes(b"n\xffm.cpp").to_os_string();
        let u = Unit {
            dir: PathBuf::from("b"),
            ext: "cpp".to_string(),
            files: vec![name],
        };
        let targets = u.targets(&TargetStyle::Files);
        assert_eq!(targets[0].clone().into_vec(), b"./b/n\xffm.cpp".to_vec());
    }

    #[test]
    fn failures_make_the_summary_an_error() {
        let ok = Summary {
            units: vec![unit()],
            ..Default::default()
        };
        assert!(ok.into_result().is_ok());

        let failed = Summary {
            units: vec![unit()],
            ignored: vec![],
            failures: vec![UnitFailure {
                unit: unit(),
                message: "code should be clang-formatted".to_string(),
            }],
        };
        let err = failed.into_result().unwrap_err();
        let trace = format!("{err:?}");
        assert!(trace.contains("1 of 1 unit(s) failed"));
        assert!(trace.contains("code should be clang-formatted"));
    }
}
