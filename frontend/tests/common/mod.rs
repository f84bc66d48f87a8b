//! In-memory remote store and drivers shared by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use todo_frontend::effects::perform;
use todo_frontend::{Msg, Result, TaskApi, TodoError, TodoState};
use todo_shared::{NewTask, Task, TaskId};

/// In-memory stand-in for the remote store.
#[derive(Clone, Default)]
pub struct FakeRemote {
    inner: Rc<RefCell<Remote>>,
}

#[derive(Default)]
struct Remote {
    tasks: Vec<Task>,
    next_id: u64,
    failures: VecDeque<TodoError>,
    requests: usize,
}

impl FakeRemote {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        let remote = FakeRemote::default();
        {
            let mut inner = remote.inner.borrow_mut();
            inner.tasks = tasks;
            inner.next_id = next_id;
        }
        remote
    }

    pub fn fail_next(&self, error: TodoError) {
        self.inner.borrow_mut().failures.push_back(error);
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.inner.borrow().tasks.clone()
    }

    pub fn requests(&self) -> usize {
        self.inner.borrow().requests
    }

    fn begin(&self) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.requests += 1;
        match inner.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl TaskApi for FakeRemote {
    async fn fetch_all(&self) -> Result<Vec<Task>> {
        self.begin()?;
        Ok(self.snapshot())
    }

    async fn create(&self, task: &NewTask) -> Result<Task> {
        self.begin()?;
        let mut inner = self.inner.borrow_mut();
        let created = Task {
            id: TaskId(inner.next_id),
            title: task.title.clone(),
            completed: task.completed,
        };
        inner.next_id += 1;
        inner.tasks.push(created.clone());
        Ok(created)
    }

    async fn update(&self, task: &Task) -> Result<Task> {
        self.begin()?;
        let mut inner = self.inner.borrow_mut();
        let slot = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(TodoError::Server { status: 404 })?;
        *slot = task.clone();
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        self.begin()?;
        let mut inner = self.inner.borrow_mut();
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        if inner.tasks.len() == before {
            return Err(TodoError::Server { status: 404 });
        }
        Ok(())
    }
}

pub fn task(id: u64, title: &str, completed: bool) -> Task {
    Task {
        id: TaskId(id),
        title: title.to_string(),
        completed,
    }
}

/// Applies `msg` and every response it leads to, one request at a time.
pub async fn dispatch(state: &mut TodoState, remote: &FakeRemote, msg: Msg) {
    let mut queue = VecDeque::from([msg]);
    while let Some(msg) = queue.pop_front() {
        for effect in state.apply(msg) {
            queue.push_back(perform(remote.clone(), effect).await);
        }
    }
}

pub async fn started(remote: &FakeRemote) -> TodoState {
    let mut state = TodoState::new();
    dispatch(&mut state, remote, Msg::LoadTasks).await;
    state
}
