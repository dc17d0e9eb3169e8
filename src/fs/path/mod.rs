//! Wrapper around Path objects provided by the standard library
//!
//! In the program, we use a few kinds of paths
//! - The resolved root of the run, which is absolute
//! - Directories and files found under the root, which are absolute
//! - The same directories relative to the root, which is what ignore
//!   patterns and formatter targets are written against
//!
//! The wrapper makes sure the root is always resolved, and the helpers
//! convert relative paths to the `/`-separated form used for matching.

use std::path::{Component, Path};

mod abs_path;
pub use abs_path::*;

pub trait SourcePath {
    /// Join the normal components of the path with `/`, regardless of platform.
    ///
    /// `.` components are dropped, so `./a/b` and `a/b` give the same string.
    fn to_slash(&self) -> String;
    /// Get the extension of the path if it is one of `exts`
    ///
    /// The extensions are compared without the leading `.`
    fn source_ext<'a>(&self, exts: &'a [String]) -> Option<&'a str>;
}

impl SourcePath for Path {
    fn to_slash(&self) -> String {
        let parts = self
            .components()
            .filter_map(|c| match c {
                Component::CurDir => None,
                other => Some(other.as_os_str().to_string_lossy().into_owned()),
            })
            .collect::<Vec<_>>();
        parts.join("/")
    }

    fn source_ext<'a>(&self, exts: &'a [String]) -> Option<&'a str> {
        let ext = self.extension()?.to_str()?;
        exts.iter().find(|e| e.as_str() == ext).map(String::as_str)
    }
}

/// Strip the leading `.` of an extension, so `.cpp` and `cpp` are the same
pub fn normalize_ext(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_string()
}
