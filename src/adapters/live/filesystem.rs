//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), PortError> {
        Ok(std::fs::rename(from, to)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parents_and_rename_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LiveFileSystem;
        let tmp = dir.path().join("nested/links.json.tmp");
        let target = dir.path().join("nested/links.json");

        fs.write(&target, "old").unwrap();
        fs.write(&tmp, "new").unwrap();
        fs.rename(&tmp, &target).unwrap();

        assert_eq!(fs.read_to_string(&target).unwrap(), "new");
        assert!(!fs.exists(&tmp));
    }

    #[test]
    fn read_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LiveFileSystem.read_to_string(&dir.path().join("absent")).is_err());
    }
}
