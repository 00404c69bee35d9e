use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::spec::PackageError;

////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

fn _is_relative_to_base(path: &Path, base: &Path) -> bool {
    path.starts_with(base)
}

fn _normalize_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

pub(crate) fn is_overlap(src: &Path, dst: &Path) -> bool {
    let src_resolved = _normalize_path(src);
    let dst_resolved = _normalize_path(dst);
    _is_relative_to_base(&dst_resolved, &src_resolved)
        || _is_relative_to_base(&src_resolved, &dst_resolved)
}

/// Map a walked source directory onto the destination tree by replacing the
/// `path_dir_src_root` prefix with `path_dir_dst_root`, e.g.
/// `Release/AnyCPU/Sub` under `Release/AnyCPU` becomes `Production/Sub`.
///
/// Walked paths always start with the source root; anything else maps onto
/// the destination root itself.
pub(crate) fn derive_destination_dir(
    path_dir: &Path,
    path_dir_src_root: &Path,
    path_dir_dst_root: &Path,
) -> PathBuf {
    let path_rel = path_dir
        .strip_prefix(path_dir_src_root)
        .unwrap_or(Path::new(""));
    if path_rel.as_os_str().is_empty() {
        return path_dir_dst_root.to_path_buf();
    }
    path_dir_dst_root.join(path_rel)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DestinationReset

/// Remove whatever sits at `path_dir_dst` and create it again empty.
///
/// Symlinks at the root are unlinked, never followed.
pub(crate) fn reset_destination(path_dir_dst: &Path) -> Result<(), PackageError> {
    let wrap = |e: io::Error| PackageError::ResetDestination {
        path: path_dir_dst.to_path_buf(),
        source: e,
    };

    match fs::symlink_metadata(path_dir_dst) {
        Ok(meta_dst) if meta_dst.file_type().is_dir() => {
            tracing::debug!(path = %path_dir_dst.display(), "removing destination tree");
            fs::remove_dir_all(path_dir_dst).map_err(wrap)?;
        }
        Ok(meta_dst) if meta_dst.file_type().is_symlink() => {
            tracing::debug!(path = %path_dir_dst.display(), "unlinking destination symlink");
            _remove_symlink(path_dir_dst).map_err(wrap)?;
        }
        Ok(_) => {
            tracing::debug!(path = %path_dir_dst.display(), "removing destination file");
            fs::remove_file(path_dir_dst).map_err(wrap)?;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(wrap(e)),
    }

    fs::create_dir_all(path_dir_dst).map_err(wrap)
}

fn _remove_symlink(path_link: &Path) -> io::Result<()> {
    // Directory symlinks are directories to the Windows unlink APIs.
    #[cfg(windows)]
    {
        if path_link.is_dir() {
            return fs::remove_dir(path_link);
        }
    }
    fs::remove_file(path_link)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use super::{derive_destination_dir, is_overlap, reset_destination};

    #[test]
    fn derive_destination_dir_substitutes_prefix() {
        let path_src_root = Path::new("Release/AnyCPU");
        let path_dst_root = Path::new("Production");

        let path_root = derive_destination_dir(path_src_root, path_src_root, path_dst_root);
        assert_eq!(path_root, PathBuf::from("Production"));

        let path_sub = derive_destination_dir(
            Path::new("Release/AnyCPU/Sub/Deeper"),
            path_src_root,
            path_dst_root,
        );
        assert_eq!(path_sub, PathBuf::from("Production/Sub/Deeper"));
    }

    #[test]
    fn derive_destination_dir_never_escapes_destination_root() {
        let path_dst = derive_destination_dir(
            Path::new("/abs/Release2/AnyCPU"),
            Path::new("Release"),
            Path::new("Production"),
        );
        assert_eq!(path_dst, PathBuf::from("Production"));
    }

    #[test]
    fn overlap_detects_nesting_both_ways() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        std::fs::create_dir_all(&src).expect("mkdir src");

        assert!(is_overlap(&src, &src.join("nested")));
        assert!(is_overlap(&src.join("nested"), &src));
        assert!(is_overlap(&src, &src));
        assert!(!is_overlap(&src, &tmp.path().join("dst")));
    }

    #[test]
    fn reset_destination_clears_existing_tree() {
        let tmp = TempDir::new().expect("tempdir");
        let dst = tmp.path().join("dst");
        std::fs::create_dir_all(dst.join("stale/deeper")).expect("mkdir stale");
        std::fs::write(dst.join("stale/deeper/old.dll"), "old").expect("write stale");

        reset_destination(&dst).expect("reset");
        assert!(dst.is_dir());
        assert_eq!(std::fs::read_dir(&dst).expect("read dst").count(), 0);
    }

    #[test]
    fn reset_destination_replaces_plain_file_and_creates_parents() {
        let tmp = TempDir::new().expect("tempdir");
        let dst_file = tmp.path().join("dst_file");
        std::fs::write(&dst_file, "x").expect("write file");
        reset_destination(&dst_file).expect("reset file");
        assert!(dst_file.is_dir());

        let dst_nested = tmp.path().join("a/b/c");
        reset_destination(&dst_nested).expect("reset nested");
        assert!(dst_nested.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn reset_destination_unlinks_symlink_without_following() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().expect("tempdir");
        let outside = tmp.path().join("outside");
        let dst_link = tmp.path().join("dst_link");
        std::fs::create_dir_all(&outside).expect("mkdir outside");
        std::fs::write(outside.join("keep.dll"), "keep").expect("write outside");
        symlink(&outside, &dst_link).expect("create symlink");

        reset_destination(&dst_link).expect("reset");
        assert!(!dst_link.is_symlink());
        assert!(dst_link.is_dir());
        assert!(outside.join("keep.dll").exists());
    }
}
