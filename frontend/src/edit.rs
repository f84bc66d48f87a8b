use todo_shared::TaskId;

/// Which task, if any, is being retitled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing {
        task_id: TaskId,
        draft: String,
        /// Title sent by the last save of this session, if any.
        submitted: Option<String>,
    },
}

impl EditSession {
    /// Begins editing `task_id`. Any draft of a previous session is dropped
    /// without saving.
    pub fn start(&mut self, task_id: TaskId, current_title: &str) {
        if let EditSession::Editing { task_id: previous, .. } = self {
            if *previous != task_id {
                tracing::debug!(%previous, next = %task_id, "discarding unsaved draft");
            }
        }
        *self = EditSession::Editing {
            task_id,
            draft: current_title.to_string(),
            submitted: None,
        };
    }

    pub fn set_draft(&mut self, text: String) {
        if let EditSession::Editing { draft, .. } = self {
            *draft = text;
        }
    }

    /// The title to save, or `None` when idle or the draft is blank. The
    /// returned title is remembered until its save is confirmed.
    pub fn submit(&mut self) -> Option<(TaskId, String)> {
        match self {
            EditSession::Editing {
                task_id,
                draft,
                submitted,
            } if !draft.trim().is_empty() => {
                *submitted = Some(draft.clone());
                Some((*task_id, draft.clone()))
            }
            _ => None,
        }
    }

    /// A save of `task_id` was confirmed. The session ends only if it is
    /// the one that sent the save and the draft has not moved on since.
    pub fn confirm_saved(&mut self, task_id: TaskId) {
        if let EditSession::Editing {
            task_id: active,
            draft,
            submitted: Some(submitted),
        } = self
        {
            if *active == task_id && submitted == draft {
                *self = EditSession::Idle;
            }
        }
    }

    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }

    /// `task_id` was removed from the store.
    pub fn forget(&mut self, task_id: TaskId) {
        if self.active_task() == Some(task_id) {
            *self = EditSession::Idle;
        }
    }

    pub fn active_task(&self) -> Option<TaskId> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { task_id, .. } => Some(*task_id),
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn is_editing(&self, task_id: TaskId) -> bool {
        self.active_task() == Some(task_id)
    }
}
