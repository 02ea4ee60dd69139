use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

pub trait StorageManager: Send + Sync {
    fn write(&self, ident: &str, data: &[u8]) -> std::io::Result<()>;
    fn read(&self, ident: &str) -> std::io::Result<Vec<u8>>;
    fn exists(&self, ident: &str) -> bool;
}

#[derive(Clone, Debug)]
pub struct BackendLocal {
    pub base_dir: PathBuf,
}

impl BackendLocal {
    pub fn new(storage_dir: &str) -> std::io::Result<Self> {
        let path = PathBuf::from(storage_dir);
        std::fs::create_dir_all(&path)?;
        Ok(BackendLocal { base_dir: path })
    }
}

impl StorageManager for BackendLocal {
    fn exists(&self, ident: &str) -> bool {
        self.base_dir.join(ident).is_file()
    }

    fn read(&self, ident: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.base_dir.join(ident))
    }

    /// Write through a uniquely named temp file and rename so readers never see
    /// a partial file. The temp file is removed if anything fails.
    fn write(&self, ident: &str, data: &[u8]) -> std::io::Result<()> {
        let mut temp = NamedTempFile::new_in(&self.base_dir)?;
        temp.write_all(data)?;
        temp.persist(self.base_dir.join(ident))
            .map_err(|err| err.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn file_count(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = BackendLocal::new(dir.path().to_str().unwrap()).unwrap();

        assert!(!store.exists("config.yaml"));
        store.write("config.yaml", b"default_field: text\n").unwrap();
        assert!(store.exists("config.yaml"));
        assert_eq!(store.read("config.yaml").unwrap(), b"default_field: text\n");

        // no temp files left behind
        assert_eq!(file_count(dir.path()), 1);
    }

    #[test]
    fn test_concurrent_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(BackendLocal::new(dir.path().to_str().unwrap()).unwrap());

        for round in 0..50 {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let store = store.clone();
                    std::thread::spawn(move || {
                        let body = format!("default_field: f{round}_{i}\n");
                        store.write("config.yaml", body.as_bytes())
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap().unwrap();
            }
        }

        let saved = String::from_utf8(store.read("config.yaml").unwrap()).unwrap();
        assert!(saved.starts_with("default_field: f49_"));
        assert_eq!(file_count(dir.path()), 1);
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = BackendLocal::new(dir.path().to_str().unwrap()).unwrap();

        // a directory in the way makes the final rename fail
        std::fs::create_dir(dir.path().join("config.yaml")).unwrap();
        std::fs::write(dir.path().join("config.yaml/keep"), b"x").unwrap();

        assert!(store.write("config.yaml", b"default_field: text\n").is_err());
        assert_eq!(file_count(dir.path()), 1);
    }

    #[test]
    fn test_creates_missing_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        BackendLocal::new(nested.to_str().unwrap()).unwrap();
        assert!(nested.is_dir());
    }
}
