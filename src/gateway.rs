use std::path::Path;
use std::thread;
use tokio::sync::{mpsc, oneshot};

use crate::database::Database;
use crate::error::{Result, StorageFault};
use crate::models::{Task, TaskId};

enum Request {
    EnsureSchema(oneshot::Sender<Result<()>>),
    ListAll(oneshot::Sender<Result<Vec<Task>>>),
    Insert(String, oneshot::Sender<Result<Task>>),
    Update(TaskId, String, oneshot::Sender<Result<bool>>),
    Delete(TaskId, oneshot::Sender<Result<bool>>),
}

/// Handle to the storage worker. Clones share the same worker, which exits
/// once every handle is dropped.
#[derive(Clone)]
pub struct Gateway {
    tx: mpsc::UnboundedSender<Request>,
}

impl Gateway {
    pub fn open(path: &Path) -> Result<Self> {
        Self::spawn(Database::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::spawn(Database::open_in_memory()?)
    }

    fn spawn(db: Database) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        thread::Builder::new()
            .name("task-store".to_string())
            .spawn(move || serve(db, rx))?;
        Ok(Gateway { tx })
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        self.call(Request::EnsureSchema).await
    }

    pub async fn list_all(&self) -> Result<Vec<Task>> {
        self.call(Request::ListAll).await
    }

    pub async fn insert(&self, text: &str) -> Result<Task> {
        let text = text.to_string();
        self.call(|reply| Request::Insert(text, reply)).await
    }

    /// Returns `false` when no row has the given id.
    pub async fn update(&self, id: TaskId, text: &str) -> Result<bool> {
        let text = text.to_string();
        self.call(|reply| Request::Update(id, text, reply)).await
    }

    /// Returns `false` when no row has the given id.
    pub async fn delete(&self, id: TaskId) -> Result<bool> {
        self.call(|reply| Request::Delete(id, reply)).await
    }

    async fn call<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T>>) -> Request,
    ) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(make(reply))
            .map_err(|_| StorageFault::WorkerGone)?;
        response.await.map_err(|_| StorageFault::WorkerGone)?
    }
}

fn serve(db: Database, mut rx: mpsc::UnboundedReceiver<Request>) {
    while let Some(request) = rx.blocking_recv() {
        // A dropped receiver means the caller gave up; nothing to report.
        match request {
            Request::EnsureSchema(reply) => {
                let _ = reply.send(db.ensure_schema());
            }
            Request::ListAll(reply) => {
                let _ = reply.send(db.list_all());
            }
            Request::Insert(text, reply) => {
                let _ = reply.send(db.insert(&text));
            }
            Request::Update(id, text, reply) => {
                let _ = reply.send(db.update(id, &text));
            }
            Request::Delete(id, reply) => {
                let _ = reply.send(db.delete(id));
            }
        }
    }
    log::debug!("storage worker stopped");
}
