use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::TraversalError;

/// A tree of files that can be enumerated and opened by relative path.
pub trait FileTree {
    /// Opens the file at `path`, relative to the tree root.
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>>;

    /// Every regular file in the tree, in a stable order. Directories are not
    /// yielded.
    fn files(&self) -> Box<dyn Iterator<Item = Result<PathBuf, TraversalError>> + '_>;
}

const DEFAULT_IGNORES: [&str; 4] = [".git", "__pycache__", ".DS_Store", "Thumbs.db"];

fn is_ignored(rel: &Path, patterns: &[Pattern]) -> bool {
    let name = rel.file_name().and_then(|s| s.to_str()).unwrap_or("");
    if DEFAULT_IGNORES.contains(&name) {
        return true;
    }
    let s_rel = rel.to_string_lossy().replace('\\', "/");
    patterns
        .iter()
        .any(|pat| pat.matches(&s_rel) || pat.matches(name))
}

/// A directory on disk.
#[derive(Debug, Clone)]
pub struct DirTree {
    root: PathBuf,
    ignore_patterns: Vec<Pattern>,
}

impl DirTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<Pattern>) -> Self {
        self.ignore_patterns = patterns;
        self
    }
}

impl FileTree for DirTree {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(self.root.join(path))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn files(&self) -> Box<dyn Iterator<Item = Result<PathBuf, TraversalError>> + '_> {
        let root = self.root.as_path();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| match e.path().strip_prefix(root) {
                Ok(rel) if rel != Path::new("") => !is_ignored(rel, &self.ignore_patterns),
                _ => true,
            });

        Box::new(walker.filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(TraversalError {
                        root: root.to_path_buf(),
                        source,
                    }))
                }
            };
            // Symlinks are not followed while walking, but a link to a file
            // is still a file to compare.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                return None;
            }
            entry
                .path()
                .strip_prefix(root)
                .ok()
                .map(|rel| Ok(rel.to_path_buf()))
        }))
    }
}

/// An in-memory tree keyed by relative path. Handy for fixtures: the reference
/// side of a test can live in code while the actual side sits on disk.
#[derive(Debug, Clone, Default)]
pub struct MemTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), data.into());
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, data);
        self
    }
}

impl FileTree for MemTree {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        match self.files.get(path) {
            Some(data) => Ok(Box::new(Cursor::new(data.as_slice()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("open {}: file does not exist", path.display()),
            )),
        }
    }

    fn files(&self) -> Box<dyn Iterator<Item = Result<PathBuf, TraversalError>> + '_> {
        Box::new(self.files.keys().cloned().map(Ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;

    #[test]
    fn mem_tree_lists_in_path_order() {
        let tree = MemTree::new()
            .with_file("b.txt", "b")
            .with_file("a/z.txt", "z")
            .with_file("a.txt", "a");
        let files: Vec<_> = tree.files().map(|r| r.unwrap()).collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("a/z.txt"),
                PathBuf::from("b.txt")
            ]
        );
    }

    #[test]
    fn mem_tree_missing_file_is_not_found() {
        let tree = MemTree::new();
        let err = tree.open(Path::new("nope.txt")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn dir_tree_skips_dirs_and_ignored_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("sub/deeper")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("sub/deeper/c.txt"), "c").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("build.log"), "log").unwrap();
        fs::write(root.join(".git/HEAD"), "ref").unwrap();

        let patterns = vec![Pattern::new("*.log").unwrap()];
        let tree = DirTree::new(root).with_ignore_patterns(patterns);
        let files: Vec<_> = tree.files().map(|r| r.unwrap()).collect();
        assert_eq!(
            files,
            vec![PathBuf::from("a.txt"), PathBuf::from("sub/deeper/c.txt")]
        );

        let mut text = String::new();
        tree.open(Path::new("a.txt"))
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "a");
    }

    #[cfg(unix)]
    #[test]
    fn dir_tree_lists_symlinked_files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("dir")).unwrap();
        fs::write(root.join("real.txt"), "content").unwrap();
        std::os::unix::fs::symlink(root.join("real.txt"), root.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("dir"), root.join("dir_link")).unwrap();

        let tree = DirTree::new(root);
        let files: Vec<_> = tree.files().map(|r| r.unwrap()).collect();
        assert_eq!(
            files,
            vec![PathBuf::from("link.txt"), PathBuf::from("real.txt")]
        );

        let mut text = String::new();
        tree.open(Path::new("link.txt"))
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "content");
    }

    #[test]
    fn dir_tree_missing_root_is_a_traversal_error() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = DirTree::new(tmp.path().join("missing"));
        let first = tree.files().next().unwrap();
        assert!(first.is_err());
    }
}
