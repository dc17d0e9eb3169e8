use crate::core::Unit;
use crate::error::PathError;
use crate::fs::{AbsPath, IgnoreRules, SourcePath};
use error_stack::{IntoReport, Result};
use std::ffi::OsString;
use std::path::Path;
use walkdir::WalkDir;

/// Units and ignored directories found under the root
#[derive(Debug, Default)]
pub struct Scan {
    pub units: Vec<Unit>,
    pub ignored: Vec<String>,
}

/// Walk every directory below the root once and group its direct files by extension.
///
/// The root itself is not a candidate. Ignored directories are skipped, but
/// their children are still visited and checked against the rules on their own.
/// Directories that cannot be read are logged and skipped.
pub fn scan_tree(root: &AbsPath, rules: &IgnoreRules, exts: &[String]) -> Scan {
    let mut scan = Scan::default();
    let walker = WalkDir::new(root.as_path())
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping entry that cannot be walked: {e}");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let rel = match root.relative(entry.path()) {
            Some(rel) => rel,
            None => continue,
        };
        let dir = rel.to_slash();
        if rules.is_ignored(rel) {
            log::debug!("ignoring directory: {dir}");
            scan.ignored.push(dir);
            continue;
        }
        match scan_dir(entry.path(), exts) {
            Ok(by_ext) => {
                for (ext, files) in exts.iter().zip(by_ext) {
                    if files.is_empty() {
                        continue;
                    }
                    scan.units.push(Unit {
                        dir: rel.to_path_buf(),
                        ext: ext.clone(),
                        files,
                    });
                }
            }
            Err(e) => log::warn!("skipping directory: {e:?}"),
        }
    }
    log::info!(
        "found {} unit(s), ignored {} directory(ies)",
        scan.units.len(),
        scan.ignored.len()
    );

    scan
}

/// List the files directly inside `dir`, one sorted list per extension in `exts`
pub fn scan_dir(dir: &Path, exts: &[String]) -> Result<Vec<Vec<OsString>>, PathError> {
    let entries = dir.read_dir().into_report().map_err(|e| {
        e.change_context(PathError::from(&dir))
            .attach_printable("failed to read directory")
    })?;

    let mut by_ext = vec![Vec::new(); exts.len()];

    for entry in entries {
        let entry = entry.into_report().map_err(|e| {
            e.change_context(PathError::from(&dir))
                .attach_printable("failed to read directory entry")
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if let Some(ext) = path.source_ext(exts) {
            if let Some(i) = exts.iter().position(|e| e == ext) {
                by_ext[i].push(entry.file_name());
            }
        }
    }
    for files in by_ext.iter_mut() {
        files.sort();
    }

    Ok(by_ext)
}
