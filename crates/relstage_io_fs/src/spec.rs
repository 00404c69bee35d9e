//! Package specification models, default constants, and top-level error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region Defaults

/// Build output tree read by the default run.
pub const C_PATH_DIR_SRC_DEFAULT: &str = "HaCreator/bin/Release";
/// Staging tree owned (deleted and rebuilt) by the default run.
pub const C_PATH_DIR_DST_DEFAULT: &str = "Production";

/// File basenames copied into the staging tree.
pub const L_PATTERNS_INCLUDE_FILES_DEFAULT: [&str; 4] =
    ["*.exe.config", "*.exe", "*.dll", "Help.htm"];
/// Debug-hosting artifacts carved out of the include set.
pub const L_PATTERNS_EXCLUDE_FILES_DEFAULT: [&str; 2] = ["*.vshost.exe.config", "*.vshost.exe"];

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `package_release`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPackageOptions {
    /// Build output tree to read.
    pub path_dir_src: PathBuf,
    /// Staging tree; removed and recreated on every run.
    pub path_dir_dst: PathBuf,
    /// Include globs applied to file basename. Empty means include all.
    pub patterns_include_files: Vec<String>,
    /// Exclude globs applied to file basename. Empty means exclude none.
    pub patterns_exclude_files: Vec<String>,
}

impl SpecPackageOptions {
    /// Default filter with explicit roots.
    pub fn with_roots<P, Q>(dir_source: P, dir_destination: Q) -> Self
    where
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        Self {
            path_dir_src: dir_source.into(),
            path_dir_dst: dir_destination.into(),
            ..Self::default()
        }
    }
}

impl Default for SpecPackageOptions {
    fn default() -> Self {
        Self {
            path_dir_src: PathBuf::from(C_PATH_DIR_SRC_DEFAULT),
            path_dir_dst: PathBuf::from(C_PATH_DIR_DST_DEFAULT),
            patterns_include_files: L_PATTERNS_INCLUDE_FILES_DEFAULT
                .iter()
                .map(|p| p.to_string())
                .collect(),
            patterns_exclude_files: L_PATTERNS_EXCLUDE_FILES_DEFAULT
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// Errors that abort a packaging run.
///
/// Every failure is fatal: the first error stops the run and nothing is
/// rolled back, so the destination may be left partially populated.
#[derive(Debug, Error)]
pub enum PackageError {
    /// Invalid include/exclude glob.
    #[error("Invalid pattern in include/exclude: {0}")]
    InvalidPattern(String),

    /// Source and destination overlap (`src` contains `dst` or vice versa).
    #[error(
        "Source and destination directories overlap: {} <-> {}",
        .source_root.display(),
        .destination_root.display()
    )]
    SourceDestinationOverlap {
        /// Normalized source directory.
        source_root: PathBuf,
        /// Normalized destination directory.
        destination_root: PathBuf,
    },

    /// Destination root could not be removed or recreated.
    #[error("Failed to reset destination {}: {source}", .path.display())]
    ResetDestination {
        /// Destination root.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source directory could not be listed.
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDirectory {
        /// Directory being listed.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A mirrored destination directory could not be created.
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDirectory {
        /// Directory being created.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file copy failed.
    #[error("Failed to copy {} -> {}: {source}", .path_src.display(), .path_dst.display())]
    CopyFile {
        /// Source file.
        path_src: PathBuf,
        /// Destination file.
        path_dst: PathBuf,
        #[source]
        source: io::Error,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
