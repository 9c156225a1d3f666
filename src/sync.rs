use crate::editor::LineEditor;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::models::{LoadState, Task, TaskId};

pub struct TaskList {
    gateway: Gateway,
    tasks: Vec<Task>,
    draft: LineEditor,
    state: LoadState,
}

impl TaskList {
    pub fn new(gateway: Gateway) -> Self {
        TaskList {
            gateway,
            tasks: Vec::new(),
            draft: LineEditor::new(),
            state: LoadState::Loading,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn draft(&self) -> &LineEditor {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut LineEditor {
        &mut self.draft
    }

    pub fn draft_text(&self) -> &str {
        self.draft.text()
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft.set_text(text);
    }

    /// Ensures the schema, then reads every row. Runs once at startup; a
    /// failure here is fatal for the screen.
    pub async fn load(&mut self) -> Result<()> {
        if let Err(err) = self.gateway.ensure_schema().await {
            log::error!("failed to create task table: {}", err);
            return Err(err);
        }
        match self.gateway.list_all().await {
            Ok(tasks) => self.tasks = tasks,
            Err(err) => {
                log::error!("failed to load tasks: {}", err);
                return Err(err);
            }
        }
        self.state = LoadState::Ready;
        log::info!("loaded {} tasks", self.tasks.len());
        Ok(())
    }

    /// Stores the draft as a new task and appends it.
    pub async fn on_add(&mut self) -> Result<TaskId> {
        match self.gateway.insert(self.draft.text()).await {
            Ok(task) => {
                let id = task.id;
                self.tasks.push(task);
                self.draft.clear();
                Ok(id)
            }
            Err(err) => {
                log::error!("failed to add task: {}", err);
                Err(err)
            }
        }
    }

    /// Replaces the text of task `id` with the draft. Returns `false`, leaving
    /// everything untouched, when the row no longer exists.
    pub async fn on_update(&mut self, id: TaskId) -> Result<bool> {
        let updated = match self.gateway.update(id, self.draft.text()).await {
            Ok(updated) => updated,
            Err(err) => {
                log::error!("failed to update task #{}: {}", id, err);
                return Err(err);
            }
        };

        if !updated {
            log::debug!("task #{} not found for update", id);
            return Ok(false);
        }

        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.text = self.draft.text().to_string();
        }
        self.draft.clear();
        Ok(true)
    }

    /// Removes task `id`. The draft is left as is.
    pub async fn on_delete(&mut self, id: TaskId) -> Result<bool> {
        let deleted = match self.gateway.delete(id).await {
            Ok(deleted) => deleted,
            Err(err) => {
                log::error!("failed to delete task #{}: {}", id, err);
                return Err(err);
            }
        };

        if !deleted {
            log::debug!("task #{} not found for delete", id);
            return Ok(false);
        }

        self.tasks.retain(|t| t.id != id);
        Ok(true)
    }
}
