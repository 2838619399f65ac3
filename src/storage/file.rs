//! FileKeyValueStore - one file per key under a directory.
//!
//! Keys are encoded with URL-safe base64 to form file names, so namespaced
//! keys such as `@storefront:cart` are safe on every platform. Writes go to
//! a temp file that is then renamed over the target.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use super::{KeyValueStore, StorageError};

const EXTENSION: &str = "json";

#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
    // serializes writers within this process; rename keeps readers consistent
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileKeyValueStore {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name = URL_SAFE_NO_PAD.encode(key.as_bytes());
        self.dir.join(format!("{}.{}", name, EXTENSION))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let bytes = match fs::read(self.path_for(key)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|err| StorageError::InvalidData(err.to_string()))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("write"))?;

        let target = self.path_for(key);
        let tmp = target.with_extension("tmp");
        if let Err(err) = write_then_rename(&tmp, &target, value.as_bytes()) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("remove"))?;

        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn write_then_rename(tmp: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    {
        let mut file = fs::File::create(tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(tmp, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static NEXT_DIR: AtomicU64 = AtomicU64::new(1);

    fn temp_dir() -> PathBuf {
        let n = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "storefront-cart-file-{}-{}",
            std::process::id(),
            n
        ))
    }

    #[test]
    fn get_missing_returns_none() {
        let store = FileKeyValueStore::open(temp_dir()).unwrap();
        assert_eq!(store.get("@storefront:cart").unwrap(), None);
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn set_overwrites_and_survives_reopen() {
        let dir = temp_dir();
        {
            let store = FileKeyValueStore::open(&dir).unwrap();
            store.set("@storefront:cart", "[1]".into()).unwrap();
            store.set("@storefront:cart", "[2]".into()).unwrap();
        }

        let reopened = FileKeyValueStore::open(&dir).unwrap();
        assert_eq!(
            reopened.get("@storefront:cart").unwrap().as_deref(),
            Some("[2]")
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn keys_map_to_distinct_files() {
        let store = FileKeyValueStore::open(temp_dir()).unwrap();
        store.set("a:b", "1".into()).unwrap();
        store.set("a/b", "2".into()).unwrap();

        assert_eq!(store.get("a:b").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("a/b").unwrap().as_deref(), Some("2"));

        store.remove("a:b").unwrap();
        store.remove("a:b").unwrap();
        assert_eq!(store.get("a:b").unwrap(), None);
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn non_utf8_value_is_invalid_data() {
        let store = FileKeyValueStore::open(temp_dir()).unwrap();
        fs::write(store.path_for("@storefront:cart"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();

        assert!(matches!(
            store.get("@storefront:cart"),
            Err(StorageError::InvalidData(_))
        ));
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn failed_write_removes_temp_file() {
        let store = FileKeyValueStore::open(temp_dir()).unwrap();
        let target = store.path_for("@storefront:cart");
        // a directory at the target path makes the rename fail
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        assert!(store.set("@storefront:cart", "[]".into()).is_err());
        assert!(!target.with_extension("tmp").exists());
        assert!(target.is_dir());
        fs::remove_dir_all(store.dir()).unwrap();
    }
}
