//! Reconciliation of the local task list with the remote store.
//!
//! `TodoState::apply` is the only way state changes. UI messages produce
//! [`Effect`]s (requests to the remote store) and leave the task list alone;
//! response messages carry the store's answer and are the only thing that
//! mutates it. Responses are applied in the order they arrive.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use todo_shared::{NewTask, Task, TaskId, TaskPatch};

use crate::edit::EditSession;
use crate::error::{Result, TodoError};
use crate::filter::{self, Filter};
use crate::store::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOrigin {
    Toggle,
    Rename,
}

/// A request for the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchAll,
    Create(NewTask),
    Update { origin: UpdateOrigin, task: Task },
    Delete(TaskId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    LoadTasks,
    TasksLoaded(Result<Vec<Task>>),
    SetNewTaskTitle(String),
    CreateTask,
    TaskCreated {
        submitted: NewTask,
        result: Result<Task>,
    },
    ToggleTask(TaskId),
    EditTask(TaskId),
    SetEditTitle(String),
    SaveEdit,
    CancelEdit,
    TaskUpdated {
        origin: UpdateOrigin,
        id: TaskId,
        result: Result<Task>,
    },
    DeleteTask(TaskId),
    TaskDeleted {
        id: TaskId,
        result: Result<()>,
    },
    ClearCompleted,
    SetFilter(Filter),
    DismissError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Toggle,
    Rename,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Load => "load tasks",
            Action::Create => "add task",
            Action::Toggle => "update task",
            Action::Rename => "rename task",
            Action::Delete => "delete task",
        })
    }
}

impl From<UpdateOrigin> for Action {
    fn from(origin: UpdateOrigin) -> Self {
        match origin {
            UpdateOrigin::Toggle => Action::Toggle,
            UpdateOrigin::Rename => Action::Rename,
        }
    }
}

/// Buttons shown on a task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Save,
    Cancel,
    Delete,
}

/// A remote call that did not take effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not {action}: {error}")]
pub struct ActionError {
    pub action: Action,
    pub task_id: Option<TaskId>,
    pub error: TodoError,
}

#[derive(Debug, Clone, Default)]
pub struct TodoState {
    store: TaskStore,
    new_task_title: String,
    edit: EditSession,
    filter: Filter,
    loading: bool,
    creating: usize,
    in_flight: HashMap<TaskId, usize>,
    last_error: Option<ActionError>,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::LoadTasks => {
                self.loading = true;
                vec![Effect::FetchAll]
            }
            Msg::TasksLoaded(Ok(tasks)) => {
                tracing::debug!(count = tasks.len(), "tasks loaded");
                self.loading = false;
                self.store.replace_all(tasks);
                if let Some(id) = self.edit.active_task() {
                    if self.store.get(id).is_none() {
                        self.edit.forget(id);
                    }
                }
                Vec::new()
            }
            Msg::TasksLoaded(Err(error)) => {
                self.loading = false;
                self.fail(Action::Load, None, error);
                Vec::new()
            }
            Msg::SetNewTaskTitle(title) => {
                self.new_task_title = title;
                Vec::new()
            }
            Msg::CreateTask => {
                if self.new_task_title.trim().is_empty() {
                    tracing::debug!("{}", TodoError::ValidationRejected);
                    return Vec::new();
                }
                self.creating += 1;
                vec![Effect::Create(NewTask::new(self.new_task_title.clone()))]
            }
            Msg::TaskCreated { submitted, result } => {
                self.creating = self.creating.saturating_sub(1);
                match result {
                    Ok(task) => {
                        tracing::debug!(id = %task.id, "task created");
                        // A load answered after the create may already hold it.
                        self.store.upsert(task);
                        if self.new_task_title == submitted.title {
                            self.new_task_title.clear();
                        }
                    }
                    Err(error) => self.fail(Action::Create, None, error),
                }
                Vec::new()
            }
            Msg::ToggleTask(id) => {
                let Some(task) = self.store.get(id) else {
                    return Vec::new();
                };
                let task = task.patched(&TaskPatch::completed(!task.completed));
                self.begin(id);
                vec![Effect::Update {
                    origin: UpdateOrigin::Toggle,
                    task,
                }]
            }
            Msg::EditTask(id) => {
                if let Some(task) = self.store.get(id) {
                    self.edit.start(id, &task.title);
                }
                Vec::new()
            }
            Msg::SetEditTitle(draft) => {
                self.edit.set_draft(draft);
                Vec::new()
            }
            Msg::SaveEdit => {
                let Some((id, title)) = self.edit.submit() else {
                    return Vec::new();
                };
                let Some(task) = self.store.get(id) else {
                    return Vec::new();
                };
                let task = task.patched(&TaskPatch::title(title));
                self.begin(id);
                vec![Effect::Update {
                    origin: UpdateOrigin::Rename,
                    task,
                }]
            }
            Msg::CancelEdit => {
                self.edit.cancel();
                Vec::new()
            }
            Msg::TaskUpdated { origin, id, result } => {
                self.finish(id);
                match result {
                    Ok(task) => {
                        tracing::debug!(%id, completed = task.completed, "task updated");
                        if !self.store.replace(task) {
                            tracing::debug!(%id, "updated task is no longer loaded");
                        }
                        if origin == UpdateOrigin::Rename {
                            self.edit.confirm_saved(id);
                        }
                    }
                    Err(error) => self.fail(origin.into(), Some(id), error),
                }
                Vec::new()
            }
            Msg::DeleteTask(id) => {
                if self.store.get(id).is_none() {
                    return Vec::new();
                }
                self.begin(id);
                vec![Effect::Delete(id)]
            }
            Msg::TaskDeleted { id, result } => {
                self.finish(id);
                match result {
                    Ok(()) => {
                        tracing::debug!(%id, "task deleted");
                        self.store.remove(id);
                        self.edit.forget(id);
                    }
                    Err(error) => self.fail(Action::Delete, Some(id), error),
                }
                Vec::new()
            }
            Msg::ClearCompleted => {
                let ids: Vec<TaskId> = self
                    .store
                    .iter()
                    .filter(|t| t.completed)
                    .map(|t| t.id)
                    .collect();
                ids.into_iter()
                    .map(|id| {
                        self.begin(id);
                        Effect::Delete(id)
                    })
                    .collect()
            }
            Msg::SetFilter(filter) => {
                self.filter = filter;
                Vec::new()
            }
            Msg::DismissError => {
                self.last_error = None;
                Vec::new()
            }
        }
    }

    fn begin(&mut self, id: TaskId) {
        *self.in_flight.entry(id).or_default() += 1;
    }

    fn finish(&mut self, id: TaskId) {
        if let Some(count) = self.in_flight.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                self.in_flight.remove(&id);
            }
        }
    }

    fn fail(&mut self, action: Action, task_id: Option<TaskId>, error: TodoError) {
        let failure = ActionError {
            action,
            task_id,
            error,
        };
        tracing::warn!(task_id = ?failure.task_id, "{failure}");
        self.last_error = Some(failure);
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The filtered projection shown to the user.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter::visible(self.store.as_slice(), self.filter)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn new_task_title(&self) -> &str {
        &self.new_task_title
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Delete is offered in both modes so an edited task can be removed.
    pub fn row_actions(&self, id: TaskId) -> Vec<RowAction> {
        if self.edit.is_editing(id) {
            vec![RowAction::Save, RowAction::Cancel, RowAction::Delete]
        } else {
            vec![RowAction::Edit, RowAction::Delete]
        }
    }

    pub fn is_creating(&self) -> bool {
        self.creating > 0
    }

    /// A request touching `id` has been sent and not yet answered.
    pub fn is_in_flight(&self, id: TaskId) -> bool {
        self.in_flight.contains_key(&id)
    }

    pub fn last_error(&self) -> Option<&ActionError> {
        self.last_error.as_ref()
    }
}
