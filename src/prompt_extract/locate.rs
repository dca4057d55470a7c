//! Finds the log snapshot to read.
//!
//! Candidates are regular files directly inside the working directory whose name matches the
//! glob `<prefix>*<suffix>`, with prefix and suffix taken literally. Selection is deterministic
//! and independent of directory enumeration order.

use crate::config::{InputConfig, Selection};
use crate::error::{ExtractError, Result};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LogLocator {
    input: InputConfig,
    glob: Pattern,
}

#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl LogLocator {
    pub fn new(input: InputConfig) -> Result<Self> {
        let glob = Pattern::new(&format!(
            "{}*{}",
            Pattern::escape(&input.prefix),
            Pattern::escape(&input.suffix)
        ))?;
        Ok(Self { input, glob })
    }

    fn matches(&self, name: &str) -> bool {
        self.glob.matches(name)
    }

    fn scan(&self, dir: &Path) -> Result<Vec<Candidate>> {
        let mut found = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !self.matches(&name) {
                continue;
            }
            // follows symlinks, unlike DirEntry::metadata
            let meta = match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => meta,
                Ok(_) => continue,
                Err(e) => {
                    debug!(file = %name, error = %e, "skipping unreadable candidate");
                    continue;
                }
            };
            found.push(Candidate {
                name,
                path: entry.path(),
                modified: meta.modified().ok(),
            });
        }
        Ok(found)
    }

    /// All candidate paths, sorted by file name.
    pub fn candidates<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let mut found = self.scan(dir.as_ref())?;
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found.into_iter().map(|c| c.path).collect())
    }

    /// Picks the log to read, or `NoInputFound` when the directory holds none.
    pub fn select<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let found = self.scan(dir)?;
        debug!(count = found.len(), pattern = %self.input.pattern(), "scanned for logs");

        let picked = match self.input.selection {
            Selection::Name => found.into_iter().max_by(|a, b| a.name.cmp(&b.name)),
            Selection::Modified => found
                .into_iter()
                .max_by(|a, b| a.modified.cmp(&b.modified).then(a.name.cmp(&b.name))),
        };

        match picked {
            Some(candidate) => {
                info!(file = %candidate.name, "selected log");
                Ok(candidate.path)
            }
            None => Err(ExtractError::NoInputFound {
                dir: dir.to_path_buf(),
                pattern: self.input.pattern(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_selects_greatest_name_regardless_of_creation_order() {
        let temp = TempDir::new().unwrap();
        for name in [
            "test-output-debug-2025-11-14T10-00.log",
            "test-output-debug-2025-11-15T08-30.log",
            "test-output-debug-2025-11-01T23-59.log",
        ] {
            touch(temp.path(), name);
        }

        let locator = LogLocator::new(InputConfig::default()).unwrap();
        let picked = locator.select(temp.path()).unwrap();
        assert_eq!(
            picked.file_name().unwrap(),
            "test-output-debug-2025-11-15T08-30.log"
        );
    }

    #[test]
    fn test_ignores_non_matching_entries() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "test-output-debug-a.log");
        touch(temp.path(), "test-output-debug-z.txt");
        touch(temp.path(), "other-debug-z.log");
        fs::create_dir(temp.path().join("test-output-debug-zz.log")).unwrap();

        let locator = LogLocator::new(InputConfig::default()).unwrap();
        let candidates = locator.candidates(temp.path()).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            locator.select(temp.path()).unwrap().file_name().unwrap(),
            "test-output-debug-a.log"
        );
    }

    #[test]
    fn test_empty_wildcard_matches() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "test-output-debug-.log");

        let locator = LogLocator::new(InputConfig::default()).unwrap();
        assert!(locator.select(temp.path()).is_ok());
    }

    #[test]
    fn test_glob_metacharacters_in_prefix_are_literal() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "run[1]-b.log");
        touch(temp.path(), "run1-z.log");

        let input = InputConfig {
            prefix: "run[1]-".into(),
            ..InputConfig::default()
        };
        let locator = LogLocator::new(input).unwrap();
        assert_eq!(locator.candidates(temp.path()).unwrap().len(), 1);
        assert_eq!(
            locator.select(temp.path()).unwrap().file_name().unwrap(),
            "run[1]-b.log"
        );
    }

    #[test]
    fn test_no_candidates_is_no_input_found() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "notes.log");

        let locator = LogLocator::new(InputConfig::default()).unwrap();
        let err = locator.select(temp.path()).unwrap_err();
        match err {
            ExtractError::NoInputFound { dir, pattern } => {
                assert_eq!(dir, temp.path());
                assert_eq!(pattern, "test-output-debug-*.log");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_modified_selection_prefers_newest_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "test-output-debug-b.log");
        touch(temp.path(), "test-output-debug-a.log");

        let older = SystemTime::now() - Duration::from_secs(3600);
        File::options()
            .write(true)
            .open(temp.path().join("test-output-debug-b.log"))
            .unwrap()
            .set_modified(older)
            .unwrap();

        let input = InputConfig {
            selection: Selection::Modified,
            ..InputConfig::default()
        };
        let picked = LogLocator::new(input).unwrap().select(temp.path()).unwrap();
        assert_eq!(picked.file_name().unwrap(), "test-output-debug-a.log");

        let by_name = LogLocator::new(InputConfig::default())
            .unwrap()
            .select(temp.path())
            .unwrap();
        assert_eq!(by_name.file_name().unwrap(), "test-output-debug-b.log");
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let temp = TempDir::new().unwrap();
        let locator = LogLocator::new(InputConfig::default()).unwrap();
        let err = locator.select(temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
