//! `relstage_io_fs` v1:
//! Rust-side release staging engine.
//!
//! Copies the shippable subset of a build output tree (executables, their
//! `.exe.config` files, libraries and `Help.htm`) into a freshly rebuilt
//! staging directory with the same relative layout.
//!
//! Modules:
//! - `package` : destination reset and mirror/copy orchestration
//! - `walk`    : lazy top-down directory traversal
//! - `filter`  : file-name inclusion predicate
//! - `spec`    : defaults/options/errors
//! - `report`  : run-time report model
//! - `util`    : shared path helpers

pub mod filter;
pub mod package;
pub mod report;
pub mod spec;
mod util;
pub mod walk;

pub use filter::SpecReleaseFilter;
pub use package::package_release;
pub use report::{ReportPackage, ReportPackageBuilder};
pub use spec::{
    C_PATH_DIR_DST_DEFAULT, C_PATH_DIR_SRC_DEFAULT, L_PATTERNS_EXCLUDE_FILES_DEFAULT,
    L_PATTERNS_INCLUDE_FILES_DEFAULT, PackageError, SpecPackageOptions,
};
pub use walk::{SpecWalkEntry, WalkTopDown, walk_top_down};
