// Path table and on-disk layout of a file report

use crate::error::{ReportError, ReportResult};
use crate::state::Node;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};

/// File name of every log file, root and per node
pub const LOG_FILE: &str = ".log";

/// Live node → log file mapping
#[derive(Debug)]
pub struct PathTable<N: Node> {
    entries: HashMap<N, PathBuf>,
}

impl<N: Node> Default for PathTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> PathTable<N> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, node: N, log: PathBuf) {
        self.entries.insert(node, log);
    }

    pub fn get(&self, node: &N) -> Option<&Path> {
        self.entries.get(node).map(PathBuf::as_path)
    }

    pub fn remove(&mut self, node: &N) -> Option<PathBuf> {
        self.entries.remove(node)
    }

    pub fn contains(&self, node: &N) -> bool {
        self.entries.contains_key(node)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.entries.keys()
    }
}

/// Create the run directory. An existing directory is a conflict.
pub fn create_root_dir(path: &Path) -> ReportResult<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ReportError::DirectoryCreate {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::create_dir(path).map_err(|source| match source.kind() {
        io::ErrorKind::AlreadyExists => ReportError::RootConflict {
            path: path.to_path_buf(),
        },
        _ => ReportError::DirectoryCreate {
            path: path.to_path_buf(),
            source,
        },
    })?;

    Ok(path.to_path_buf())
}

/// Create an empty log file inside `dir`. The file must not exist yet.
pub fn create_log_file(dir: &Path) -> ReportResult<PathBuf> {
    let path = dir.join(LOG_FILE);

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|source| ReportError::FileCreate {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

/// Create the directory of a single node below `parent`
pub fn create_node_dir(parent: &Path, name: &str) -> ReportResult<PathBuf> {
    let path = parent.join(name);

    if !is_valid_dir_name(name) {
        return Err(ReportError::DirectoryCreate {
            path,
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is not a valid directory name", name),
            ),
        });
    }

    // A single create_dir makes the existence check and the creation one step.
    fs::create_dir(&path).map_err(|source| match source.kind() {
        io::ErrorKind::AlreadyExists => ReportError::NodeConflict { path: path.clone() },
        _ => ReportError::DirectoryCreate {
            path: path.clone(),
            source,
        },
    })?;

    Ok(path)
}

/// A node name must map to exactly one normal path component
fn is_valid_dir_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TestNode;

    #[test]
    fn test_path_table_operations() {
        let node = TestNode::leaf("a");
        let mut table = PathTable::new();
        assert!(table.is_empty());

        table.insert(node.clone(), PathBuf::from("a/.log"));
        assert!(table.contains(&node));
        assert_eq!(table.get(&node), Some(Path::new("a/.log")));
        assert_eq!(table.len(), 1);

        assert_eq!(table.remove(&node), Some(PathBuf::from("a/.log")));
        assert!(table.remove(&node).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_valid_dir_names() {
        assert!(is_valid_dir_name("test_login"));
        assert!(is_valid_dir_name("suite name with spaces"));
        assert!(is_valid_dir_name(".hidden"));
        assert!(!is_valid_dir_name(""));
        assert!(!is_valid_dir_name("."));
        assert!(!is_valid_dir_name(".."));
        assert!(!is_valid_dir_name("a/b"));
        assert!(!is_valid_dir_name("/abs"));
    }

    #[test]
    fn test_create_root_dir_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("run");

        assert_eq!(create_root_dir(&root).unwrap(), root);
        let err = create_root_dir(&root).unwrap_err();
        assert!(matches!(err, ReportError::RootConflict { .. }));
    }

    #[test]
    fn test_create_root_dir_below_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "").unwrap();

        let err = create_root_dir(&file.join("run")).unwrap_err();
        assert!(matches!(err, ReportError::DirectoryCreate { .. }));
        assert!(file.is_file());
    }

    #[test]
    fn test_create_log_file_twice() {
        let dir = tempfile::tempdir().unwrap();

        let log = create_log_file(dir.path()).unwrap();
        assert_eq!(log, dir.path().join(LOG_FILE));
        assert!(log.is_file());

        let err = create_log_file(dir.path()).unwrap_err();
        assert!(matches!(err, ReportError::FileCreate { .. }));
    }

    #[test]
    fn test_create_node_dir() {
        let dir = tempfile::tempdir().unwrap();

        let created = create_node_dir(dir.path(), "node").unwrap();
        assert!(created.is_dir());

        let err = create_node_dir(dir.path(), "node").unwrap_err();
        assert!(matches!(err, ReportError::NodeConflict { .. }));

        let err = create_node_dir(dir.path(), "../escape").unwrap_err();
        assert!(matches!(err, ReportError::DirectoryCreate { .. }));
        assert!(!dir.path().parent().unwrap().join("escape").exists());
    }

    #[test]
    fn test_create_node_dir_over_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("node"), "keep").unwrap();

        let err = create_node_dir(dir.path(), "node").unwrap_err();
        assert!(matches!(err, ReportError::NodeConflict { .. }));
        assert_eq!(err.path(), &dir.path().join("node"));
        assert_eq!(fs::read_to_string(dir.path().join("node")).unwrap(), "keep");
    }
}
