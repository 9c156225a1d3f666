use rusqlite::Connection;
use std::path::PathBuf;
use tasklist::{Gateway, Task, TaskList};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    path: PathBuf,
    gateway: Gateway,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.db");
        let gateway = Gateway::open(&path).unwrap();
        Fixture { _dir: dir, path, gateway }
    }

    async fn loaded_list(&self) -> TaskList {
        let mut list = TaskList::new(self.gateway.clone());
        list.load().await.unwrap();
        list
    }

    async fn assert_mirrored(&self, list: &TaskList) {
        let mut stored = self.gateway.list_all().await.unwrap();
        let mut shown = list.tasks().to_vec();
        stored.sort_by_key(|t| t.id);
        shown.sort_by_key(|t| t.id);
        assert_eq!(shown, stored);
    }
}

#[tokio::test]
async fn test_load_reads_existing_rows() {
    let fixture = Fixture::new();
    fixture.gateway.ensure_schema().await.unwrap();
    fixture.gateway.insert("from before").await.unwrap();

    let mut list = TaskList::new(fixture.gateway.clone());
    assert!(list.is_loading());
    list.load().await.unwrap();
    assert!(!list.is_loading());
    assert_eq!(list.tasks(), &[Task::new(1, "from before")]);
}

#[tokio::test]
async fn test_mirror_holds_after_every_write() {
    let fixture = Fixture::new();
    let mut list = fixture.loaded_list().await;

    list.set_draft("buy milk");
    let milk = list.on_add().await.unwrap();
    fixture.assert_mirrored(&list).await;

    list.set_draft("walk dog");
    let dog = list.on_add().await.unwrap();
    fixture.assert_mirrored(&list).await;

    list.set_draft("");
    let blank = list.on_add().await.unwrap();
    fixture.assert_mirrored(&list).await;

    list.set_draft("buy oat milk");
    assert!(list.on_update(milk).await.unwrap());
    fixture.assert_mirrored(&list).await;

    assert!(list.on_delete(dog).await.unwrap());
    fixture.assert_mirrored(&list).await;

    list.set_draft("ghost");
    assert!(!list.on_update(dog).await.unwrap());
    assert!(!list.on_delete(dog).await.unwrap());
    fixture.assert_mirrored(&list).await;

    assert_eq!(
        list.tasks(),
        &[Task::new(milk, "buy oat milk"), Task::new(blank, "")]
    );
}

#[tokio::test]
async fn test_rejected_insert_leaves_state_alone() {
    let fixture = Fixture::new();
    let mut list = fixture.loaded_list().await;
    list.set_draft("first");
    list.on_add().await.unwrap();

    let conn = Connection::open(&fixture.path).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_insert BEFORE INSERT ON tasks
         BEGIN SELECT RAISE(ABORT, 'insert rejected'); END;",
    )
    .unwrap();

    list.set_draft("never stored");
    assert!(list.on_add().await.is_err());
    assert_eq!(list.tasks().len(), 1);
    assert_eq!(list.draft_text(), "never stored");
    fixture.assert_mirrored(&list).await;
}

#[tokio::test]
async fn test_rejected_update_leaves_state_alone() {
    let fixture = Fixture::new();
    let mut list = fixture.loaded_list().await;
    list.set_draft("original");
    let id = list.on_add().await.unwrap();

    let conn = Connection::open(&fixture.path).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_update BEFORE UPDATE ON tasks
         BEGIN SELECT RAISE(ABORT, 'update rejected'); END;",
    )
    .unwrap();

    list.set_draft("changed");
    assert!(list.on_update(id).await.is_err());
    assert_eq!(list.tasks(), &[Task::new(id, "original")]);
    assert_eq!(list.draft_text(), "changed");
}

#[tokio::test]
async fn test_load_fault_keeps_loading() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todo.db");
    std::fs::write(&path, vec![0x42u8; 4096]).unwrap();

    let mut list = TaskList::new(Gateway::open(&path).unwrap());
    assert!(list.load().await.is_err());
    assert!(list.is_loading());
    assert!(list.tasks().is_empty());
}

#[tokio::test]
async fn test_rejected_delete_leaves_state_alone() {
    let fixture = Fixture::new();
    let mut list = fixture.loaded_list().await;
    list.set_draft("stays");
    let id = list.on_add().await.unwrap();

    let conn = Connection::open(&fixture.path).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_delete BEFORE DELETE ON tasks
         BEGIN SELECT RAISE(ABORT, 'delete rejected'); END;",
    )
    .unwrap();

    assert!(list.on_delete(id).await.is_err());
    assert_eq!(list.tasks(), &[Task::new(id, "stays")]);
    fixture.assert_mirrored(&list).await;
}
