//! Task list persisted in SQLite.
//!
//! Rows live in a single `tasks (id, task)` table. Ids come from
//! `AUTOINCREMENT`, so a deleted id is never handed out again.
//! SQLite calls are synchronous and run on the blocking pool.

use rusqlite::{params, Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database directory error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Database connection lock poisoned")]
    Poisoned,
}

/// A free-text task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
}

/// SQLite-backed task store. Cheap to clone; clones share the connection.
#[derive(Clone)]
pub struct TaskStore {
    conn: Arc<Mutex<Connection>>,
}

impl TaskStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_task ON tasks(task);
            "#,
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&conn).map_err(StoreError::from)
        })
        .await?
    }

    /// All tasks, oldest first.
    pub async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, task FROM tasks ORDER BY id ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(Task {
                    id: row.get(0)?,
                    text: row.get(1)?,
                })
            })?;
            let tasks = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(tasks)
        })
        .await
    }

    /// Insert a task and return its id.
    pub async fn add(&self, text: &str) -> Result<i64, StoreError> {
        let text = text.to_string();
        self.with_conn(move |conn| {
            conn.execute("INSERT INTO tasks (task) VALUES (?1)", params![text])?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    /// Delete a task. Returns `false` when no task has that id.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.with_conn(move |conn| {
            let removed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_task_lifecycle() {
        let store = TaskStore::open_in_memory().unwrap();

        let id = store.add("buy milk").await.unwrap();
        let tasks = store.list().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "buy milk");
        assert_eq!(tasks[0].id, id);

        assert!(store.delete(id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_store_unchanged() {
        let store = TaskStore::open_in_memory().unwrap();
        store.add("call mom").await.unwrap();
        let before = store.list().await.unwrap();

        assert!(!store.delete(9999).await.unwrap());
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = TaskStore::open_in_memory().unwrap();
        let first = store.add("one").await.unwrap();
        let second = store.add("two").await.unwrap();
        assert_ne!(first, second);

        store.delete(second).await.unwrap();
        let third = store.add("three").await.unwrap();
        assert!(third > second);
    }

    #[tokio::test]
    async fn test_tasks_survive_reopen() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("data").join("tasks.db");

        {
            let store = TaskStore::open(&path).unwrap();
            store.add("water plants").await.unwrap();
        }

        let store = TaskStore::open(&path).unwrap();
        let tasks = store.list().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "water plants");
    }

    #[test]
    fn test_open_reports_unusable_directory() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let result = TaskStore::open(&blocker.join("tasks.db"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
