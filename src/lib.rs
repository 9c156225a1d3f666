pub mod cli;
pub mod config;
pub mod database;
pub mod editor;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod sync;
pub mod ui;

pub use error::{Result, StorageFault};
pub use gateway::Gateway;
pub use models::{Task, TaskId};
pub use sync::TaskList;
