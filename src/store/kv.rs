//! Read-only key-value store inspector
//!
//! The store is a SQLite database holding a single `kv(key BLOB PRIMARY
//! KEY, value BLOB)` table. It is always opened read-only and must
//! already exist; the toolkit never creates or mutates databases.
//! Iteration is in key order, so digests over the content are
//! deterministic.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};

#[derive(Debug)]
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("open db {}", path.display()))?;
        Ok(KvStore { conn })
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Visit every pair in key order.
    pub fn for_each(&self, mut visit: impl FnMut(&[u8], &[u8])) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM kv ORDER BY key")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let key = row.get_ref(0)?.as_blob()?;
            let value = row.get_ref(1)?.as_blob()?;
            visit(key, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(pairs: &[(&str, &str)]) -> (tempdir::Dir, std::path::PathBuf) {
        let dir = tempdir::Dir::new();
        let path = dir.path().join("test.sqlite3");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE kv (key BLOB PRIMARY KEY, value BLOB NOT NULL)")
            .unwrap();
        for (k, v) in pairs {
            conn.execute(
                "INSERT INTO kv(key, value) VALUES (?1, ?2)",
                (k.as_bytes(), v.as_bytes()),
            )
            .unwrap();
        }
        (dir, path)
    }

    // minimal self-cleaning temp dir, enough for these tests
    mod tempdir {
        use std::path::{Path, PathBuf};
        use std::sync::atomic::{AtomicU64, Ordering};

        static COUNTER: AtomicU64 = AtomicU64::new(0);

        pub struct Dir(PathBuf);

        impl Dir {
            pub fn new() -> Self {
                let path = std::env::temp_dir().join(format!(
                    "trxkit-kv-test-{}-{}",
                    std::process::id(),
                    COUNTER.fetch_add(1, Ordering::Relaxed)
                ));
                std::fs::create_dir_all(&path).unwrap();
                Dir(path)
            }

            pub fn path(&self) -> &Path {
                &self.0
            }
        }

        impl Drop for Dir {
            fn drop(&mut self) {
                let _ = std::fs::remove_dir_all(&self.0);
            }
        }
    }

    #[test]
    fn test_open_missing_fails() {
        assert!(KvStore::open(Path::new("/nonexistent/nope.sqlite3")).is_err());
    }

    #[test]
    fn test_get() {
        let (_dir, path) = seeded(&[("alpha", "1"), ("beta", "2")]);
        let store = KvStore::open(&path).unwrap();
        assert_eq!(store.get(b"alpha").unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.get(b"missing").unwrap(), None);
    }

    #[test]
    fn test_for_each_is_key_ordered() {
        let (_dir, path) = seeded(&[("b", "2"), ("a", "1"), ("c", "3")]);
        let store = KvStore::open(&path).unwrap();
        let mut keys = Vec::new();
        store.for_each(|k, _| keys.push(k.to_vec())).unwrap();
        assert_eq!(keys, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }
}
