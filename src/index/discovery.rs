use crate::index::types::IndexConfig;
use ahash::AHashSet;
use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Collect every indexable file under `root`.
///
/// Ignored directory names are pruned at the walker level so their subtrees
/// are never read. Hidden entries are skipped. Only the fixed exclusion rules
/// apply; `.gitignore` and friends are not consulted. Entries that cannot be
/// read (including an unreadable root) are dropped silently.
pub fn discover_files(root: &Path, config: &IndexConfig) -> Vec<PathBuf> {
    let ignored_dirs: AHashSet<String> = config.ignored_dirs.iter().cloned().collect();
    let extensions: AHashSet<String> = config
        .extensions
        .iter()
        .map(|ext| ext.to_ascii_lowercase())
        .collect();
    let max_file_size = config.max_file_size;

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && ignored_dirs.contains(&*entry.file_name().to_string_lossy()))
        })
        .build();

    walker
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| has_allowed_extension(entry.path(), &extensions))
        .filter(|entry| match entry.metadata() {
            Ok(meta) if meta.len() <= max_file_size => true,
            Ok(meta) => {
                debug!(path = %entry.path().display(), size = meta.len(), "Skipping oversized file");
                false
            }
            Err(_) => false,
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn has_allowed_extension(path: &Path, extensions: &AHashSet<String>) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| extensions.contains(&ext.to_ascii_lowercase()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(mut files: Vec<PathBuf>, root: &Path) -> Vec<String> {
        files.sort();
        files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_filters_by_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("script.PY"), "print('hi')").unwrap();
        fs::write(dir.path().join("image.png"), [0u8, 1, 2]).unwrap();
        fs::write(dir.path().join("Makefile"), "all:").unwrap();

        let files = discover_files(dir.path(), &IndexConfig::default());
        assert_eq!(names(files, dir.path()), vec!["main.rs", "script.PY"]);
    }

    #[test]
    fn test_prunes_ignored_and_hidden() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".hidden")).unwrap();
        fs::create_dir_all(root.join("src/target")).unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "x").unwrap();
        fs::write(root.join(".hidden/secret.py"), "x").unwrap();
        fs::write(root.join("src/target/gen.rs"), "x").unwrap();
        fs::write(root.join("src/.env.py"), "x").unwrap();
        fs::write(root.join("src/lib.rs"), "x").unwrap();

        let files = discover_files(root, &IndexConfig::default());
        assert_eq!(names(files, root), vec!["src/lib.rs"]);
    }

    #[test]
    fn test_size_boundary() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("exact.txt"), vec![b'a'; 1_000_000]).unwrap();
        fs::write(dir.path().join("over.txt"), vec![b'a'; 1_000_001]).unwrap();

        let files = discover_files(dir.path(), &IndexConfig::default());
        assert_eq!(names(files, dir.path()), vec!["exact.txt"]);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let dir = tempdir().unwrap();
        let files = discover_files(&dir.path().join("does-not-exist"), &IndexConfig::default());
        assert!(files.is_empty());
    }

    #[test]
    fn test_ignored_root_name_is_still_walked() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("build");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();

        let files = discover_files(&root, &IndexConfig::default());
        assert_eq!(files.len(), 1);
    }
}
