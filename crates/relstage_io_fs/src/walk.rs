//! Lazy top-down directory traversal.
//!
//! The walk only reports what is on disk; it never creates or copies anything.
//! Mirroring lives in [`crate::package`].

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::spec::PackageError;

/// One visited directory with its immediate children split by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecWalkEntry {
    /// Visited directory (source root joined with the relative offset).
    pub path_dir: PathBuf,
    /// Immediate subdirectory names, sorted.
    pub names_dirs: Vec<OsString>,
    /// Immediate non-directory names, sorted.
    pub names_files: Vec<OsString>,
}

/// Pre-order directory iterator returned by [`walk_top_down`].
///
/// Directories are yielded before their descendants and siblings in name
/// order. Symlinked directories are listed in `names_dirs` but never
/// descended into. After the first `Err` the iterator is exhausted.
#[derive(Debug)]
pub struct WalkTopDown {
    l_dirs_pending: Vec<PathBuf>,
    b_root_pending: bool,
}

/// Walk `dir_root` top-down. A missing root yields nothing.
pub fn walk_top_down<P>(dir_root: P) -> WalkTopDown
where
    P: AsRef<Path>,
{
    WalkTopDown {
        l_dirs_pending: vec![dir_root.as_ref().to_path_buf()],
        b_root_pending: true,
    }
}

impl WalkTopDown {
    fn fail(&mut self, path_dir: PathBuf, e: io::Error) -> Result<SpecWalkEntry, PackageError> {
        self.l_dirs_pending.clear();
        Err(PackageError::ReadDirectory {
            path: path_dir,
            source: e,
        })
    }
}

impl Iterator for WalkTopDown {
    type Item = Result<SpecWalkEntry, PackageError>;

    fn next(&mut self) -> Option<Self::Item> {
        let path_dir = self.l_dirs_pending.pop()?;
        let b_is_root = std::mem::take(&mut self.b_root_pending);

        let iter_entries = match fs::read_dir(&path_dir) {
            Ok(iter) => iter,
            Err(e) if b_is_root && e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path_dir.display(), "walk root missing");
                return None;
            }
            Err(e) => return Some(self.fail(path_dir, e)),
        };

        match read_walk_entry(&path_dir, iter_entries) {
            Ok((spec_walk_entry, l_dirs_descend)) => {
                // Reverse so the stack pops siblings in name order.
                self.l_dirs_pending.extend(l_dirs_descend.into_iter().rev());
                Some(Ok(spec_walk_entry))
            }
            Err(e) => Some(self.fail(path_dir, e)),
        }
    }
}

fn read_walk_entry(
    path_dir: &Path,
    iter_entries: fs::ReadDir,
) -> io::Result<(SpecWalkEntry, Vec<PathBuf>)> {
    let mut names_dirs: Vec<OsString> = Vec::new();
    let mut names_files: Vec<OsString> = Vec::new();
    let mut l_dirs_descend: Vec<PathBuf> = Vec::new();

    for entry_res in iter_entries {
        let entry = entry_res?;
        let path_entry = entry.path();
        let cfg_file_type = entry.file_type()?;

        let b_is_symlink = cfg_file_type.is_symlink();
        let b_is_dir = cfg_file_type.is_dir() || (b_is_symlink && path_entry.is_dir());
        if b_is_dir {
            if !b_is_symlink {
                l_dirs_descend.push(path_entry);
            }
            names_dirs.push(entry.file_name());
        } else {
            names_files.push(entry.file_name());
        }
    }

    names_dirs.sort();
    names_files.sort();
    l_dirs_descend.sort();

    Ok((
        SpecWalkEntry {
            path_dir: path_dir.to_path_buf(),
            names_dirs,
            names_files,
        },
        l_dirs_descend,
    ))
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::Path;

    use tempfile::TempDir;

    use super::walk_top_down;
    use crate::spec::PackageError;

    fn write_text(path: &Path, txt: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, txt).expect("write text");
    }

    fn names(l: &[&str]) -> Vec<OsString> {
        l.iter().map(OsString::from).collect()
    }

    #[test]
    fn walk_yields_pre_order_with_sorted_children() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        write_text(&src.join("z.dll"), "z");
        write_text(&src.join("a.exe"), "a");
        write_text(&src.join("b/inner/deep.txt"), "d");
        write_text(&src.join("a/one.txt"), "1");
        std::fs::create_dir_all(src.join("c")).expect("mkdir c");

        let l_entries = walk_top_down(&src)
            .collect::<Result<Vec<_>, _>>()
            .expect("walk");

        let l_paths = l_entries
            .iter()
            .map(|e| e.path_dir.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            l_paths,
            vec![
                src.clone(),
                src.join("a"),
                src.join("b"),
                src.join("b/inner"),
                src.join("c"),
            ]
        );

        assert_eq!(l_entries[0].names_dirs, names(&["a", "b", "c"]));
        assert_eq!(l_entries[0].names_files, names(&["a.exe", "z.dll"]));
        assert_eq!(l_entries[3].names_files, names(&["deep.txt"]));
        assert!(l_entries[4].names_dirs.is_empty());
        assert!(l_entries[4].names_files.is_empty());
    }

    #[test]
    fn walk_missing_root_yields_nothing() {
        let tmp = TempDir::new().expect("tempdir");
        let mut iter_walk = walk_top_down(tmp.path().join("missing"));
        assert!(iter_walk.next().is_none());
    }

    #[test]
    fn walk_root_is_file_fails() {
        let tmp = TempDir::new().expect("tempdir");
        let path_file = tmp.path().join("not_a_dir.dll");
        write_text(&path_file, "x");

        let mut iter_walk = walk_top_down(&path_file);
        let err = iter_walk
            .next()
            .expect("one item")
            .expect_err("file root must fail");
        assert!(matches!(err, PackageError::ReadDirectory { .. }));
        assert!(iter_walk.next().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn walk_lists_but_does_not_descend_symlinked_dirs() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        let outside = tmp.path().join("outside");
        write_text(&outside.join("x.dll"), "x");
        write_text(&src.join("a.dll"), "a");
        symlink(&outside, src.join("linked")).expect("create dir symlink");
        symlink(src.join("missing.dll"), src.join("broken.dll")).expect("create broken symlink");

        let l_entries = walk_top_down(&src)
            .collect::<Result<Vec<_>, _>>()
            .expect("walk");

        assert_eq!(l_entries.len(), 1);
        assert_eq!(l_entries[0].names_dirs, names(&["linked"]));
        assert_eq!(l_entries[0].names_files, names(&["a.dll", "broken.dll"]));
    }
}
