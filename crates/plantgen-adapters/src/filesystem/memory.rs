//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use plantgen_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{EntryKind, FileMode, TreeEntry},
    error::PlantgenResult,
};

/// In-memory filesystem for testing.
///
/// Cloning shares the same tree, so a test can hand one clone to a service
/// and inspect the other.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    modes: BTreeMap<PathBuf, FileMode>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Add a file with its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        self.seed(path.as_ref(), content.as_ref(), None);
        self
    }

    /// Add a file with explicit permission bits (testing helper).
    pub fn with_file_mode(
        self,
        path: impl AsRef<Path>,
        content: impl AsRef<[u8]>,
        mode: FileMode,
    ) -> Self {
        self.seed(path.as_ref(), content.as_ref(), Some(mode));
        self
    }

    fn seed(&self, path: &Path, content: &[u8], mode: Option<FileMode>) {
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_vec());
            if let Some(mode) = mode {
                inner.modes.insert(path.to_path_buf(), mode);
            }
        }
    }

    /// Read a file's content (testing helper).
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Read a file's content as UTF-8 (testing helper).
    pub fn contents_string(&self, path: &Path) -> Option<String> {
        self.contents(path)
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// Mode last set on a path, if any.
    pub fn mode(&self, path: &Path) -> Option<FileMode> {
        let inner = self.inner.read().ok()?;
        inner.modes.get(path).copied()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> PlantgenResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn write(&self) -> PlantgenResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }
}

impl MemoryFilesystemInner {
    /// Enforce the owner write bit the way a POSIX filesystem would for an
    /// unprivileged user. Paths without a recorded mode are writable.
    fn check_writable(&self, path: &Path, action: &str) -> PlantgenResult<()> {
        match self.modes.get(path) {
            Some(mode) if mode.bits() & 0o200 == 0 => Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("Failed to {action}: permission denied"),
            }
            .into()),
            _ => Ok(()),
        }
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> PlantgenResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) {
            return Err(not_a_directory(path));
        }
        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn walk(&self, root: &Path) -> PlantgenResult<Vec<TreeEntry>> {
        let inner = self.read()?;
        if !inner.directories.contains(root) {
            return Err(ApplicationError::FilesystemError {
                path: root.to_path_buf(),
                reason: "Failed to walk directory: not found".into(),
            }
            .into());
        }

        let directories = inner
            .directories
            .iter()
            .map(|p| (p, EntryKind::Directory));
        let files = inner.files.keys().map(|p| (p, EntryKind::File));

        let mut entries: Vec<TreeEntry> = directories
            .chain(files)
            .filter(|(path, _)| path.as_path() != root)
            .filter_map(|(path, kind)| {
                let relative = path.strip_prefix(root).ok()?.to_path_buf();
                let mode = inner.modes.get(path).copied();
                Some(match kind {
                    EntryKind::Directory => TreeEntry::directory(relative, mode),
                    EntryKind::File => TreeEntry::file(relative, mode),
                })
            })
            .collect();

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> PlantgenResult<Vec<u8>> {
        let inner = self.read()?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to read file: not found".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> PlantgenResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }
        if inner.directories.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to write file: is a directory".into(),
            }
            .into());
        }

        let target = if inner.files.contains_key(path) {
            Some(path)
        } else {
            path.parent()
        };
        if let Some(target) = target {
            inner.check_writable(target, "write file")?;
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn set_mode(&self, path: &Path, mode: FileMode) -> PlantgenResult<()> {
        let mut inner = self.write()?;
        if !inner.files.contains_key(path) && !inner.directories.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to set permissions: not found".into(),
            }
            .into());
        }
        inner.modes.insert(path.to_path_buf(), mode);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> PlantgenResult<()> {
        let mut inner = self.write()?;
        for parent in [from.parent(), to.parent()].into_iter().flatten() {
            inner.check_writable(parent, "rename")?;
        }

        if let Some(content) = inner.files.remove(from) {
            inner.files.insert(to.to_path_buf(), content);
            if let Some(mode) = inner.modes.remove(from) {
                inner.modes.insert(to.to_path_buf(), mode);
            }
            return Ok(());
        }

        if !inner.directories.contains(from) {
            return Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "Failed to rename: not found".into(),
            }
            .into());
        }

        let inner = &mut *inner;
        inner.directories = move_prefix(std::mem::take(&mut inner.directories), from, to);
        inner.files = move_prefix(std::mem::take(&mut inner.files), from, to);
        inner.modes = move_prefix(std::mem::take(&mut inner.modes), from, to);
        Ok(())
    }
}

fn insert_ancestors(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn not_a_directory(path: &Path) -> plantgen_core::error::PlantgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "Failed to create directory: a file exists at this path".into(),
    }
    .into()
}

/// Re-key every path under `from` to live under `to`.
fn move_prefix<C, T>(collection: C, from: &Path, to: &Path) -> C
where
    C: IntoIterator<Item = T> + FromIterator<T>,
    T: Rekey,
{
    collection
        .into_iter()
        .map(|item| item.rekey(from, to))
        .collect()
}

trait Rekey {
    fn rekey(self, from: &Path, to: &Path) -> Self;
}

fn rekey_path(path: PathBuf, from: &Path, to: &Path) -> PathBuf {
    match path.strip_prefix(from) {
        Ok(rest) if rest.as_os_str().is_empty() => to.to_path_buf(),
        Ok(rest) => to.join(rest),
        Err(_) => path,
    }
}

impl Rekey for PathBuf {
    fn rekey(self, from: &Path, to: &Path) -> Self {
        rekey_path(self, from, to)
    }
}

impl<V> Rekey for (PathBuf, V) {
    fn rekey(self, from: &Path, to: &Path) -> Self {
        (rekey_path(self.0, from, to), self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_lists_entries_relative_to_root() {
        let fs = MemoryFilesystem::new()
            .with_file("/tpl/a.go", "a")
            .with_file("/tpl/sub/b.go", "b");

        let entries = fs.walk(Path::new("/tpl")).unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a.go"),
                PathBuf::from("sub"),
                PathBuf::from("sub/b.go"),
            ]
        );
    }

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/missing/a.txt"), b"x").is_err());

        fs.create_dir_all(Path::new("/missing")).unwrap();
        fs.write_file(Path::new("/missing/a.txt"), b"x").unwrap();
        assert_eq!(fs.contents(Path::new("/missing/a.txt")), Some(b"x".to_vec()));
    }

    #[test]
    fn renaming_a_directory_moves_its_subtree() {
        let fs = MemoryFilesystem::new()
            .with_file_mode("/out/template/template.go", "x", FileMode::from_bits(0o600));

        fs.rename(Path::new("/out/template"), Path::new("/out/widget"))
            .unwrap();

        assert!(fs.is_dir(Path::new("/out/widget")));
        assert!(!fs.exists(Path::new("/out/template")));
        assert_eq!(
            fs.mode(Path::new("/out/widget/template.go")),
            Some(FileMode::from_bits(0o600))
        );
    }

    #[test]
    fn read_only_entries_refuse_writes() {
        let fs = MemoryFilesystem::new()
            .with_file_mode("/tpl/a.txt", "a", FileMode::from_bits(0o444));
        assert!(fs.write_file(Path::new("/tpl/a.txt"), b"b").is_err());

        fs.set_mode(Path::new("/tpl"), FileMode::from_bits(0o555))
            .unwrap();
        assert!(fs.write_file(Path::new("/tpl/new.txt"), b"n").is_err());
        assert!(fs
            .rename(Path::new("/tpl/a.txt"), Path::new("/tpl/b.txt"))
            .is_err());

        fs.set_mode(Path::new("/tpl/a.txt"), FileMode::DEFAULT_FILE)
            .unwrap();
        fs.write_file(Path::new("/tpl/a.txt"), b"b").unwrap();
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let view = fs.clone();
        fs.create_dir_all(Path::new("/a")).unwrap();
        assert!(view.exists(Path::new("/a")));
    }

    #[test]
    fn set_mode_on_missing_path_fails() {
        let fs = MemoryFilesystem::new();
        assert!(fs
            .set_mode(Path::new("/nope"), FileMode::DEFAULT_FILE)
            .is_err());
    }
}
