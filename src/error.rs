use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageFault>;

/// An unrecoverable failure of a single storage operation.
///
/// A fault means the operation did not happen: callers must not assume any
/// in-memory state was updated. A row that does not exist is not a fault,
/// `update` and `delete` report it as `false`.
#[derive(Error, Debug)]
pub enum StorageFault {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The worker thread owning the connection has stopped.
    #[error("storage worker is no longer running")]
    WorkerGone,
}
