//! Stateful comparator answering "has this path changed since my last scan?"

use std::collections::HashMap;
use std::path::Path;

/// Per-`(path, recursive)` snapshot of file mtimes, keyed by the watched
/// path string (recursion doesn't change the key — callers only ever scan
/// one trigger's path with one fixed `recursive` flag).
#[derive(Default)]
pub struct FileOracle {
    state: HashMap<String, HashMap<String, std::time::SystemTime>>,
}

impl FileOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if any watched file under `base_path` changed since
    /// the previous call for this path. The very first scan always returns
    /// `false` (no history means no change) to avoid a stampede on startup.
    /// If the path no longer exists, its history is cleared and `false` is
    /// returned; a subsequent reappearance is treated as a fresh first scan.
    pub fn scan(&mut self, base_path: &str, recursive: bool) -> bool {
        let base = Path::new(base_path);

        if !base.exists() {
            self.state.remove(base_path);
            return false;
        }

        let files = match Self::list_files(base, recursive) {
            Some(files) => files,
            None => return false,
        };

        let mut current = HashMap::new();
        for file in files {
            if let Ok(meta) = file.metadata() {
                if let Ok(mtime) = meta.modified() {
                    current.insert(file.to_string_lossy().into_owned(), mtime);
                }
            }
        }

        let previous = self.state.insert(base_path.to_string(), current.clone());

        match previous {
            None => false,
            Some(previous) => {
                if previous.keys().collect::<std::collections::HashSet<_>>()
                    != current.keys().collect::<std::collections::HashSet<_>>()
                {
                    return true;
                }
                current
                    .iter()
                    .any(|(path, mtime)| previous.get(path) != Some(mtime))
            }
        }
    }

    fn list_files(base: &Path, recursive: bool) -> Option<Vec<std::path::PathBuf>> {
        if base.is_file() {
            return Some(vec![base.to_path_buf()]);
        }
        if !base.is_dir() {
            return None;
        }

        let mut files = Vec::new();
        if recursive {
            Self::walk_recursive(base, &mut files);
        } else if let Ok(entries) = std::fs::read_dir(base) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    files.push(path);
                }
            }
        }
        Some(files)
    }

    fn walk_recursive(dir: &Path, out: &mut Vec<std::path::PathBuf>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                Self::walk_recursive(&path, out);
            } else if path.is_file() {
                out.push(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn first_scan_never_changed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();
        let mut oracle = FileOracle::new();
        assert!(!oracle.scan(dir.path().to_str().unwrap(), false));
    }

    #[test]
    fn detects_new_file_appearing() {
        let dir = tempfile::tempdir().unwrap();
        let mut oracle = FileOracle::new();
        let path = dir.path().to_str().unwrap();
        assert!(!oracle.scan(path, false));

        fs::write(dir.path().join("new.txt"), "hello").unwrap();
        assert!(oracle.scan(path, false));
        assert!(!oracle.scan(path, false));
    }

    #[test]
    fn missing_path_clears_state_and_reports_no_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");
        let mut oracle = FileOracle::new();
        assert!(!oracle.scan(path.to_str().unwrap(), false));
    }
}
