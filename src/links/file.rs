//! Loading and saving the link store through the filesystem port.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::store::{Link, LinkError, LinkStore, LinkTarget};
use crate::context::ServiceContext;

/// Failures writing the link store.
#[derive(Debug, Error)]
pub enum LinkStoreError {
    /// The store could not be rendered as JSON.
    #[error("failed to serialize link store: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The record could not be written or moved into place.
    #[error("failed to write link store {path}: {message}")]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        message: String,
    },
}

/// The link store's backing file.
///
/// Saves write a sibling `.tmp` file and rename it over the record, so an
/// interrupted save leaves the previous record intact.
pub struct LinkFile<'a> {
    ctx: &'a ServiceContext,
    path: PathBuf,
}

impl<'a> LinkFile<'a> {
    /// Binds the store to `path`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, path: &Path) -> Self {
        Self { ctx, path: path.to_path_buf() }
    }

    /// Location of the record.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if a record has been written.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.ctx.fs.exists(&self.path)
    }

    /// Reads the store, falling back to an empty one if the record is
    /// missing or unreadable. Never fails.
    #[must_use]
    pub fn load(&self) -> LinkStore {
        if !self.exists() {
            return LinkStore::new();
        }
        let contents = match self.ctx.fs.read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "link store unreadable, starting empty");
                return LinkStore::new();
            }
        };
        LinkStore::from_json(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "link store unparsable, starting empty");
            LinkStore::new()
        })
    }

    /// Stamps `lastSync` and writes the whole store.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any write fails.
    pub fn save(&self, store: &mut LinkStore) -> Result<(), LinkStoreError> {
        store.stamp(self.ctx.clock.now());
        let mut json = store.to_json()?;
        json.push('\n');

        let tmp = self.tmp_path();
        let write_err =
            |e: Box<dyn std::error::Error + Send + Sync>| LinkStoreError::Write {
                path: self.path.clone(),
                message: e.to_string(),
            };
        self.ctx.fs.write(&tmp, &json).map_err(write_err)?;
        self.ctx.fs.rename(&tmp, &self.path).map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), links = store.len(), "saved link store");
        Ok(())
    }

    /// Adds a manual link and saves immediately.
    ///
    /// # Errors
    ///
    /// Returns an error, without writing anything, if either id is already
    /// linked, or if the save fails.
    pub fn link(&self, a_id: u64, b_id: &str) -> Result<Link, LinkError> {
        let mut store = self.load();
        let link = Link::manual(a_id, b_id, self.ctx.clock.now());
        store.insert(link.clone())?;
        self.save(&mut store)?;
        Ok(link)
    }

    /// Removes the link matching `target` and saves.
    ///
    /// Nothing is written when no link matches.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] when no link matches, or an error if
    /// the save fails.
    pub fn unlink(&self, target: &LinkTarget) -> Result<Link, LinkError> {
        let mut store = self.load();
        let removed =
            store.remove(target).ok_or_else(|| LinkError::NotFound(target.clone()))?;
        self.save(&mut store)?;
        Ok(removed)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixed_time, test_context, MemFs};

    const PATH: &str = "/project/.tasklink/links.json";

    #[test]
    fn load_missing_record_is_empty() {
        let ctx = test_context(MemFs::new());
        let store = LinkFile::new(&ctx, Path::new(PATH)).load();
        assert!(store.is_empty());
        assert_eq!(store.version(), 1);
        assert!(store.last_sync().is_none());
    }

    #[test]
    fn load_garbage_record_is_empty() {
        let fs = MemFs::new();
        fs.insert(PATH, "{not json");
        let ctx = test_context(fs);
        assert!(LinkFile::new(&ctx, Path::new(PATH)).load().is_empty());
    }

    #[test]
    fn save_then_load_keeps_links_and_stamps_last_sync() {
        let ctx = test_context(MemFs::new());
        let file = LinkFile::new(&ctx, Path::new(PATH));
        let mut store = LinkStore::new();
        store.insert(Link::auto(7, "bd-1", fixed_time())).unwrap();

        file.save(&mut store).unwrap();
        let loaded = file.load();

        assert_eq!(loaded.links(), store.links());
        assert_eq!(loaded.last_sync(), Some(fixed_time()));
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let fs = MemFs::new();
        let ctx = test_context(fs.clone());
        let file = LinkFile::new(&ctx, Path::new(PATH));
        file.save(&mut LinkStore::new()).unwrap();
        assert!(fs.contains(PATH));
        assert!(!fs.contains("/project/.tasklink/links.json.tmp"));
    }

    #[test]
    fn link_persists_manual_link() {
        let ctx = test_context(MemFs::new());
        let file = LinkFile::new(&ctx, Path::new(PATH));

        let link = file.link(7, "bd-1").unwrap();
        assert!(!link.auto_linked);
        assert_eq!(file.load().by_a(7).unwrap().b_id, "bd-1");
    }

    #[test]
    fn link_rejects_taken_ids_without_writing() {
        let fs = MemFs::new();
        let ctx = test_context(fs.clone());
        let file = LinkFile::new(&ctx, Path::new(PATH));
        file.link(7, "bd-1").unwrap();
        let before = fs.read(PATH);

        assert!(matches!(file.link(7, "bd-2"), Err(LinkError::PlanningAlreadyLinked { .. })));
        assert!(matches!(file.link(8, "bd-1"), Err(LinkError::BeadsAlreadyLinked { .. })));
        assert_eq!(fs.read(PATH), before);
    }

    #[test]
    fn unlink_by_either_side() {
        let ctx = test_context(MemFs::new());
        let file = LinkFile::new(&ctx, Path::new(PATH));
        file.link(7, "bd-1").unwrap();
        file.link(8, "bd-2").unwrap();

        assert_eq!(file.unlink(&LinkTarget::parse("a:7")).unwrap().b_id, "bd-1");
        assert_eq!(file.unlink(&LinkTarget::parse("bd-2")).unwrap().a_id, 8);
        assert!(file.load().is_empty());
    }

    #[test]
    fn unlink_miss_does_not_write() {
        let fs = MemFs::new();
        let ctx = test_context(fs.clone());
        let file = LinkFile::new(&ctx, Path::new(PATH));

        assert!(matches!(file.unlink(&LinkTarget::parse("9")), Err(LinkError::NotFound(_))));
        assert!(!fs.contains(PATH));
    }
}
