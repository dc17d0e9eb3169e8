//! Ignore rules loaded from the ignore file

use super::SourcePath;
use crate::error::IgnoreError;
use error_stack::{IntoReport, Report, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::Path;

/// Lines starting with this are comments
pub const COMMENT_PREFIX: &str = "#";

/// An ordered list of glob patterns. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    patterns: Vec<IgnorePattern>,
}

#[derive(Debug, Clone)]
struct IgnorePattern {
    raw: String,
    /// `None` if the pattern is not a valid glob. Such a pattern never matches.
    matcher: Option<GlobMatcher>,
}

impl IgnorePattern {
    fn new(raw: &str) -> Self {
        // `*` and `?` stay inside one path segment, only `**` crosses `/`
        let matcher = match GlobBuilder::new(raw).literal_separator(true).build() {
            Ok(glob) => Some(glob.compile_matcher()),
            Err(e) => {
                log::warn!("ignore pattern `{raw}` is invalid and will never match: {e}");
                None
            }
        };
        Self {
            raw: raw.to_string(),
            matcher,
        }
    }

    fn is_match(&self, key: &str) -> bool {
        match &self.matcher {
            Some(m) => m.is_match(key),
            None => false,
        }
    }
}

impl IgnoreRules {
    /// Load the rules from the ignore file.
    ///
    /// The file must exist. Nothing should be scanned without it.
    pub fn load<P>(path: &P) -> Result<Self, IgnoreError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Report::new(IgnoreError)
                .attach_printable(format!("Unable to find {}", path.display())));
        }
        let text = fs::read_to_string(path).into_report().map_err(|e| {
            e.change_context(IgnoreError)
                .attach_printable(format!("cannot read ignore file: {}", path.display()))
        })?;
        let rules = Self::parse(&text);
        log::info!(
            "loaded {} ignore pattern(s) from {}",
            rules.len(),
            path.display()
        );
        Ok(rules)
    }

    /// Parse the content of an ignore file. Blank lines and comments are skipped.
    pub fn parse(text: &str) -> Self {
        let patterns = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
            .map(IgnorePattern::new)
            .collect();
        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The patterns as written in the ignore file
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.raw.as_str())
    }

    /// Check if a path relative to the root should be excluded.
    ///
    /// The path is matched in `/` form with a trailing `/`, so `dir/**`
    /// excludes `dir` itself as well as everything below it.
    pub fn is_ignored(&self, rel_path: &Path) -> bool {
        let key = match_key(rel_path);
        self.patterns.iter().any(|p| p.is_match(&key))
    }
}

fn match_key(rel_path: &Path) -> String {
    let mut key = rel_path.to_slash();
    key.push('/');
    key
}
