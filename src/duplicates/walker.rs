use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Lazily walk `root` and yield every candidate file path.
///
/// Entries within a directory come out sorted by name, so a fixed tree
/// always produces the same order. Symlinks are never followed: linked
/// directories are not descended and linked files are not yielded, which
/// also rules out cycles. Directories named in `exclude_dirs` are pruned
/// with everything below them; files named in `exclude_files` are
/// skipped at any depth. The root itself is never pruned.
pub fn walk_files<'a>(
    root: &Path,
    exclude_dirs: &'a BTreeSet<String>,
    exclude_files: &'a BTreeSet<String>,
) -> impl Iterator<Item = PathBuf> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| !is_excluded_dir(e, exclude_dirs))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(move |e| !exclude_files.contains(&*e.file_name().to_string_lossy()))
        .map(DirEntry::into_path)
}

fn is_excluded_dir(entry: &DirEntry, exclude_dirs: &BTreeSet<String>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && exclude_dirs.contains(&*entry.file_name().to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn yields_files_in_name_order() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("b")).unwrap();
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("b/2.txt"), "x").unwrap();
        std::fs::write(dir.path().join("a/1.txt"), "x").unwrap();
        std::fs::write(dir.path().join("c.txt"), "x").unwrap();

        let none = BTreeSet::new();
        let files: Vec<PathBuf> = walk_files(dir.path(), &none, &none).collect();
        assert_eq!(
            files,
            vec![
                dir.path().join("a/1.txt"),
                dir.path().join("b/2.txt"),
                dir.path().join("c.txt"),
            ]
        );
    }

    #[test]
    fn prunes_excluded_dirs_at_any_depth() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
        std::fs::create_dir_all(dir.path().join("src/node_modules/pkg")).unwrap();
        std::fs::write(dir.path().join(".git/objects/blob"), "x").unwrap();
        std::fs::write(dir.path().join("src/node_modules/pkg/index.js"), "x").unwrap();
        std::fs::write(dir.path().join("src/main.js"), "x").unwrap();

        let dirs = set(&[".git", "node_modules"]);
        let none = BTreeSet::new();
        let files: Vec<PathBuf> = walk_files(dir.path(), &dirs, &none).collect();
        assert_eq!(files, vec![dir.path().join("src/main.js")]);
    }

    #[test]
    fn skips_excluded_basenames() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pkg")).unwrap();
        std::fs::write(dir.path().join("pkg/__init__.py"), "").unwrap();
        std::fs::write(dir.path().join("pkg/mod.py"), "x").unwrap();

        let none = BTreeSet::new();
        let files_excl = set(&["__init__.py"]);
        let files: Vec<PathBuf> = walk_files(dir.path(), &none, &files_excl).collect();
        assert_eq!(files, vec![dir.path().join("pkg/mod.py")]);
    }

    #[test]
    fn root_named_like_excluded_dir_is_still_walked() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("build");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("out.bin"), "x").unwrap();

        let dirs = set(&["build"]);
        let none = BTreeSet::new();
        assert_eq!(walk_files(&root, &dirs, &none).count(), 1);
    }

    #[test]
    fn walk_is_restartable() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a"), "x").unwrap();
        std::fs::write(dir.path().join("b"), "y").unwrap();

        let none = BTreeSet::new();
        let first: Vec<PathBuf> = walk_files(dir.path(), &none, &none).collect();
        let second: Vec<PathBuf> = walk_files(dir.path(), &none, &none).collect();
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("real")).unwrap();
        std::fs::write(dir.path().join("real/f.txt"), "x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("loop")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real/f.txt"), dir.path().join("link.txt"))
            .unwrap();

        let none = BTreeSet::new();
        let files: Vec<PathBuf> = walk_files(dir.path(), &none, &none).collect();
        assert_eq!(files, vec![dir.path().join("real/f.txt")]);
    }
}
