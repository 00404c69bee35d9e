//! File-name inclusion predicate for release artifacts.

use std::ffi::OsStr;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::spec::PackageError;
#[cfg(test)]
use crate::spec::{L_PATTERNS_EXCLUDE_FILES_DEFAULT, L_PATTERNS_INCLUDE_FILES_DEFAULT};

/// Compiled include/exclude globs applied to file basenames.
///
/// A name passes when it matches any include glob (or there are none) and
/// matches no exclude glob. Matching is case-sensitive and never touches the
/// filesystem.
#[derive(Debug, Clone)]
pub struct SpecReleaseFilter {
    patterns_include_files: Option<GlobSet>,
    patterns_exclude_files: Option<GlobSet>,
}

impl SpecReleaseFilter {
    /// Compile raw glob lists. Empty lists disable the corresponding side.
    pub fn from_raw<S>(
        patterns_include_files: &[S],
        patterns_exclude_files: &[S],
    ) -> Result<Self, PackageError>
    where
        S: AsRef<str>,
    {
        Ok(Self {
            patterns_include_files: _compile(patterns_include_files)?,
            patterns_exclude_files: _compile(patterns_exclude_files)?,
        })
    }

    /// Executables, their `.exe.config`, libraries and `Help.htm`, minus the
    /// `.vshost` debug-hosting variants.
    #[cfg(test)]
    pub(crate) fn release() -> Result<Self, PackageError> {
        Self::from_raw(
            &L_PATTERNS_INCLUDE_FILES_DEFAULT,
            &L_PATTERNS_EXCLUDE_FILES_DEFAULT,
        )
    }

    /// Whether the file basename `name_file` should be copied.
    pub fn is_included<S>(&self, name_file: S) -> bool
    where
        S: AsRef<OsStr>,
    {
        let path_name = Path::new(name_file.as_ref());
        let b_included = self
            .patterns_include_files
            .as_ref()
            .is_none_or(|globs| globs.is_match(path_name));
        let b_excluded = self
            .patterns_exclude_files
            .as_ref()
            .is_some_and(|globs| globs.is_match(path_name));
        b_included && !b_excluded
    }
}

fn _compile<S>(patterns: &[S]) -> Result<Option<GlobSet>, PackageError>
where
    S: AsRef<str>,
{
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder_glob_set = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern.as_ref())
            .map_err(|e| PackageError::InvalidPattern(e.to_string()))?;
        builder_glob_set.add(glob);
    }
    let glob_set = builder_glob_set
        .build()
        .map_err(|e| PackageError::InvalidPattern(e.to_string()))?;
    Ok(Some(glob_set))
}
