//! Release staging: reset destination, mirror the source tree, copy artifacts.

use std::fs;
use std::path::Path;

use tracing::{debug, info, trace};

use crate::filter::SpecReleaseFilter;
use crate::report::{ReportPackage, ReportPackageBuilder};
use crate::spec::{PackageError, SpecPackageOptions};
use crate::util::{derive_destination_dir, is_overlap, reset_destination};
use crate::walk::{SpecWalkEntry, walk_top_down};

/// Rebuild the staging tree from the build output tree.
///
/// This function performs:
/// 1. Input validation (pattern compilation, source/destination overlap).
/// 2. Destination reset: anything at `path_dir_dst` is deleted and an empty
///    directory is created in its place.
/// 3. A top-down walk of `path_dir_src`; every subdirectory is recreated under
///    the destination and every file accepted by the include/exclude globs is
///    byte-copied to the same relative path.
///
/// A missing source root is not an error; the destination is left empty.
///
/// Fail-fast: the first filesystem error is returned as [`PackageError`] and
/// the run stops there. Nothing is retried or rolled back, so the destination
/// may be partially populated after an error.
pub fn package_release(
    spec_pkg_options: &SpecPackageOptions,
) -> Result<ReportPackage, PackageError> {
    let path_dir_src = spec_pkg_options.path_dir_src.as_path();
    let path_dir_dst = spec_pkg_options.path_dir_dst.as_path();

    let spec_filter = SpecReleaseFilter::from_raw(
        spec_pkg_options.patterns_include_files.as_slice(),
        spec_pkg_options.patterns_exclude_files.as_slice(),
    )?;
    if is_overlap(path_dir_src, path_dir_dst) {
        return Err(PackageError::SourceDestinationOverlap {
            source_root: path_dir_src.to_path_buf(),
            destination_root: path_dir_dst.to_path_buf(),
        });
    }

    info!(
        src = %path_dir_src.display(),
        dst = %path_dir_dst.display(),
        "packaging release"
    );
    reset_destination(path_dir_dst)?;

    let mut builder_pkg_report = ReportPackageBuilder::default();
    for spec_walk_entry_res in walk_top_down(path_dir_src) {
        let spec_walk_entry = spec_walk_entry_res?;
        mirror_walk_entry(
            &spec_walk_entry,
            path_dir_src,
            path_dir_dst,
            &spec_filter,
            &mut builder_pkg_report,
        )?;
    }

    let report = builder_pkg_report.build();
    info!(
        dirs_created = report.cnt_dirs_created,
        files_copied = report.cnt_files_copied,
        files_skipped = report.cnt_files_skipped,
        bytes_copied = report.n_bytes_copied,
        "release packaged"
    );
    Ok(report)
}

fn mirror_walk_entry(
    spec_walk_entry: &SpecWalkEntry,
    path_dir_src_root: &Path,
    path_dir_dst_root: &Path,
    spec_filter: &SpecReleaseFilter,
    builder_pkg_report: &mut ReportPackageBuilder,
) -> Result<(), PackageError> {
    builder_pkg_report.add_dir_scanned();
    let path_dir_src = spec_walk_entry.path_dir.as_path();
    let path_dir_dst = derive_destination_dir(path_dir_src, path_dir_src_root, path_dir_dst_root);

    for name_dir in &spec_walk_entry.names_dirs {
        let path_dir_dst_sub = path_dir_dst.join(name_dir);
        fs::create_dir(&path_dir_dst_sub).map_err(|e| PackageError::CreateDirectory {
            path: path_dir_dst_sub.clone(),
            source: e,
        })?;
        debug!(path = %path_dir_dst_sub.display(), "created directory");
        builder_pkg_report.add_dir_created();
    }

    for name_file in &spec_walk_entry.names_files {
        builder_pkg_report.add_file_scanned();
        let path_file_src = path_dir_src.join(name_file);
        if !spec_filter.is_included(name_file) {
            trace!(path = %path_file_src.display(), "skipped by filter");
            builder_pkg_report.add_file_skipped();
            continue;
        }

        let path_file_dst = path_dir_dst.join(name_file);
        let n_bytes = fs::copy(&path_file_src, &path_file_dst).map_err(|e| {
            PackageError::CopyFile {
                path_src: path_file_src.clone(),
                path_dst: path_file_dst.clone(),
                source: e,
            }
        })?;
        debug!(
            src = %path_file_src.display(),
            dst = %path_file_dst.display(),
            bytes = n_bytes,
            "copied file"
        );
        builder_pkg_report.add_file_copied(n_bytes);
    }

    Ok(())
}
