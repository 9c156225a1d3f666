use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::Result;
use crate::models::{Task, TaskId};

/// Synchronous access to the `tasks` table.
///
/// Every method runs exactly one statement; nothing is cached between calls.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        log::debug!("opened task database at {}", path.display());
        Ok(Database { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Database { conn })
    }

    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT
            )",
            [],
        )?;
        Ok(())
    }

    // No ORDER BY: rows come back in whatever order the engine scans them.
    pub fn list_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare("SELECT id, text FROM tasks")?;

        let rows = stmt.query_map([], |row| {
            Ok(Task {
                id: row.get(0)?,
                text: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            })
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }

        Ok(tasks)
    }

    pub fn insert(&self, text: &str) -> Result<Task> {
        self.conn
            .execute("INSERT INTO tasks (text) VALUES (?1)", params![text])?;
        let id = self.conn.last_insert_rowid();
        log::debug!("inserted task #{}", id);
        Ok(Task::new(id, text))
    }

    pub fn update(&self, id: TaskId, text: &str) -> Result<bool> {
        let affected = self.conn.execute(
            "UPDATE tasks SET text = ?1 WHERE id = ?2",
            params![text, id],
        )?;
        Ok(affected > 0)
    }

    pub fn delete(&self, id: TaskId) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.ensure_schema().unwrap();
        db
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let db = fresh();
        let mut last = 0;
        for text in ["a", "b", "c", "d"] {
            let task = db.insert(text).unwrap();
            assert!(task.id > last);
            assert_eq!(task.text, text);
            last = task.id;
        }
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let db = fresh();
        db.insert("first").unwrap();
        let second = db.insert("second").unwrap();
        assert!(db.delete(second.id).unwrap());

        let third = db.insert("third").unwrap();
        assert!(third.id > second.id);
    }

    #[test]
    fn test_empty_text_is_accepted() {
        let db = fresh();
        let task = db.insert("").unwrap();
        assert_eq!(db.list_all().unwrap(), vec![Task::new(task.id, "")]);
    }

    #[test]
    fn test_null_text_reads_as_empty() {
        let db = fresh();
        db.conn
            .execute("INSERT INTO tasks (text) VALUES (NULL)", [])
            .unwrap();
        let tasks = db.list_all().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "");
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let db = fresh();
        db.insert("keep me").unwrap();
        for _ in 0..3 {
            db.ensure_schema().unwrap();
        }
        assert_eq!(db.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_row() {
        let db = fresh();
        let task = db.insert("original").unwrap();

        assert!(!db.update(task.id + 100, "changed").unwrap());
        assert_eq!(db.list_all().unwrap(), vec![task]);
    }

    #[test]
    fn test_delete_twice() {
        let db = fresh();
        let task = db.insert("gone soon").unwrap();

        assert!(db.delete(task.id).unwrap());
        assert!(!db.delete(task.id).unwrap());
        assert!(db.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_statements_fail_without_schema() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.insert("no table").is_err());
        assert!(db.list_all().is_err());
    }
}
