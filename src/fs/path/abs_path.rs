use crate::error::PathError;
use error_stack::{IntoReport, Report, Result};
use std::path::{Path, PathBuf};

/// Representation of an absolute path that exists.
///
/// Using [`PathBuf`] directly in the program can be confusing,
/// since it can represent both relative and absolute paths in different contexts.
/// Hence, we use `AbsPath` for the root of the run to indicate that it is resolved and absolute.
///
/// We still use [`PathBuf`] in places that usually represent input from the user,
/// as it could be relative or absolute and may not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbsPath {
    p: PathBuf,
}

impl TryFrom<PathBuf> for AbsPath {
    type Error = Report<PathError>;

    /// Convert a [`PathBuf`] to an absolute path.
    ///
    /// This will error if:
    /// - the path doesn't exist
    /// - the path cannot be made absolute for some reason
    ///
    /// If the path is relative, it will be made absolute by
    /// using [`canonicalize`](std::path::Path::canonicalize)
    fn try_from(p: PathBuf) -> Result<Self, PathError> {
        if !p.exists() {
            return Err(Report::new(PathError::from(&p)).attach_printable("path does not exist"));
        }
        let p_abs = p.canonicalize().into_report().map_err(|e| {
            e.change_context(PathError::from(&p))
                .attach_printable("cannot resolve path as absolute")
        })?;

        Ok(Self { p: p_abs })
    }
}

/// Integration with [`PathBuf`] and [`Path`]
impl AbsPath {
    #[inline]
    pub fn as_path(&self) -> &Path {
        self.p.as_path()
    }
}

impl AsRef<Path> for AbsPath {
    #[inline]
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl AbsPath {
    /// Resolve a directory to use as the root of a run.
    ///
    /// The path must exist and be a directory.
    pub fn create_base(p: PathBuf) -> Result<Self, PathError> {
        let abs = Self::try_from(p)?;
        if !abs.p.is_dir() {
            return Err(Report::new(PathError::from(&abs)).attach_printable("path is not a directory"));
        }
        Ok(abs)
    }

    /// Resolve a path against this one without checking that it exists.
    ///
    /// If `ext` is absolute, return `ext`, otherwise join `ext` with the current path.
    pub fn join_unchecked<P>(&self, ext: &P) -> PathBuf
    where
        P: AsRef<Path>,
    {
        let path: &Path = ext.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.p.join(path)
        }
    }

    /// Get `path` relative to this one.
    ///
    /// Returns `None` if `path` is not under the current path.
    pub fn relative<'a>(&self, path: &'a Path) -> Option<&'a Path> {
        path.strip_prefix(&self.p).ok()
    }
}

impl std::fmt::Display for AbsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.p.display())
    }
}
