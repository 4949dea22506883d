use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use tempfile::NamedTempFile;

use crate::errors::WikiError;
use crate::types::{is_valid_title, Page};

const PAGE_SUFFIX: &str = ".txt";

/// Service for reading and writing page bodies, one file per title
#[derive(Debug, Clone)]
pub struct PageStore {
    root: PathBuf,
}

impl PageStore {
    /// Create a new page store rooted at `root`
    pub fn new(root: PathBuf) -> Self {
        debug!("Creating PageStore with root directory: {:?}", root);
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn page_path(&self, title: &str) -> Result<PathBuf, WikiError> {
        if !is_valid_title(title) {
            warn!("Rejected page title: {:?}", title);
            return Err(WikiError::InvalidTitle);
        }
        Ok(self.root.join(format!("{title}{PAGE_SUFFIX}")))
    }

    /// Persist a page, replacing whatever was stored under its title.
    ///
    /// The body goes to a temporary file next to the target which is then
    /// renamed into place, so concurrent readers see either the old or the
    /// new body. The file is readable by the owner only.
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.page_path(&page.title)?;
        debug!("Saving page {:?} to {:?}", page.title, path);

        let mut tmp = NamedTempFile::new_in(&self.root).map_err(|e| {
            error!("Failed to create temporary file in {:?}: {}", self.root, e);
            WikiError::Io(e)
        })?;
        tmp.write_all(page.body.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| {
            error!("Failed to persist page {:?}: {}", path, e.error);
            WikiError::Io(e.error)
        })?;

        info!("Saved page {:?}, {} bytes", page.title, page.body.len());
        Ok(())
    }

    /// Load a page. Absent pages fail with [`WikiError::NotFound`].
    pub fn load(&self, title: &str) -> Result<Page, WikiError> {
        let path = self.page_path(title)?;
        debug!("Loading page {:?} from {:?}", title, path);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No stored page for {:?}", title);
                return Err(WikiError::NotFound);
            }
            Err(e) => {
                error!("Failed to read page {:?}: {}", path, e);
                return Err(WikiError::Io(e));
            }
        };

        let body = String::from_utf8_lossy(&bytes).into_owned();
        info!("Loaded page {:?}, {} bytes", title, bytes.len());
        Ok(Page::new(title, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store() -> (TempDir, PageStore) {
        let dir = TempDir::new().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = store();
        let page = Page::new("Home", "see [Other] page\nsecond line");
        store.save(&page).unwrap();
        assert_eq!(store.load("Home").unwrap(), page);
    }

    #[test]
    fn empty_body_round_trips() {
        let (_dir, store) = store();
        store.save(&Page::placeholder("Empty")).unwrap();
        assert_eq!(store.load("Empty").unwrap().body, "");
    }

    #[test]
    fn load_missing_page_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(store.load("Nothing"), Err(WikiError::NotFound)));
    }

    #[test]
    fn save_overwrites_previous_body() {
        let (_dir, store) = store();
        store.save(&Page::new("Home", "a much longer first body")).unwrap();
        store.save(&Page::new("Home", "short")).unwrap();
        assert_eq!(store.load("Home").unwrap().body, "short");
    }

    #[test]
    fn page_is_stored_as_title_txt() {
        let (dir, store) = store();
        store.save(&Page::new("Notes", "plain text")).unwrap();
        let raw = fs::read_to_string(dir.path().join("Notes.txt")).unwrap();
        assert_eq!(raw, "plain text");
        // No temporary files are left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn non_utf8_body_is_decoded_lossily() {
        let (dir, store) = store();
        fs::write(dir.path().join("Bin.txt"), [b'o', b'k', 0xff]).unwrap();
        assert_eq!(store.load("Bin").unwrap().body, "ok\u{fffd}");
    }

    #[test]
    fn path_like_titles_are_rejected() {
        let (_dir, store) = store();
        assert!(matches!(store.load("../secret"), Err(WikiError::InvalidTitle)));
        assert!(matches!(
            store.save(&Page::new("a/b", "x")),
            Err(WikiError::InvalidTitle)
        ));
    }

    #[test]
    fn save_into_missing_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = PageStore::new(dir.path().join("missing"));
        assert!(matches!(store.save(&Page::new("Home", "x")), Err(WikiError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn saved_pages_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, store) = store();
        store.save(&Page::new("Private", "x")).unwrap();
        let mode = fs::metadata(dir.path().join("Private.txt")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
