mod common;

use pretty_assertions::assert_eq;
use todo_frontend::edit::EditSession;
use todo_frontend::effects::perform;
use todo_frontend::{Effect, Msg, TodoError, TodoState};
use todo_shared::TaskId;

use common::{dispatch, started, task, FakeRemote};

#[tokio::test]
async fn successful_operations_mirror_the_remote() {
    let remote = FakeRemote::with_tasks(vec![task(1, "a", false), task(2, "b", true)]);
    let mut state = started(&remote).await;
    assert_eq!(state.tasks(), remote.snapshot().as_slice());

    dispatch(&mut state, &remote, Msg::SetNewTaskTitle("c".into())).await;
    dispatch(&mut state, &remote, Msg::CreateTask).await;
    dispatch(&mut state, &remote, Msg::ToggleTask(TaskId(1))).await;
    dispatch(&mut state, &remote, Msg::EditTask(TaskId(3))).await;
    dispatch(&mut state, &remote, Msg::SetEditTitle("c, renamed".into())).await;
    dispatch(&mut state, &remote, Msg::SaveEdit).await;
    dispatch(&mut state, &remote, Msg::DeleteTask(TaskId(2))).await;
    dispatch(&mut state, &remote, Msg::ClearCompleted).await;

    assert_eq!(state.tasks(), remote.snapshot().as_slice());
    assert_eq!(state.tasks(), &[task(3, "c, renamed", false)]);
    assert_eq!(state.edit(), &EditSession::Idle);
    assert!(state.last_error().is_none());
}

#[tokio::test]
async fn blank_create_makes_no_request() {
    let remote = FakeRemote::with_tasks(vec![task(1, "a", false)]);
    let mut state = started(&remote).await;
    let requests = remote.requests();

    dispatch(&mut state, &remote, Msg::SetNewTaskTitle("  ".into())).await;
    dispatch(&mut state, &remote, Msg::CreateTask).await;

    assert_eq!(remote.requests(), requests);
    assert_eq!(state.tasks(), &[task(1, "a", false)]);
}

#[tokio::test]
async fn failed_load_leaves_an_empty_store() {
    let remote = FakeRemote::with_tasks(vec![task(1, "a", false)]);
    remote.fail_next(TodoError::Network("unreachable".into()));

    let state = started(&remote).await;

    assert!(state.tasks().is_empty());
    assert!(!state.is_loading());
    assert!(state.last_error().is_some());
}

#[tokio::test]
async fn failed_toggle_leaves_the_entry_unchanged() {
    let remote = FakeRemote::with_tasks(vec![task(1, "a", false), task(2, "b", true)]);
    let mut state = started(&remote).await;

    remote.fail_next(TodoError::Server { status: 500 });
    dispatch(&mut state, &remote, Msg::ToggleTask(TaskId(1))).await;

    assert_eq!(state.store().get(TaskId(1)), Some(&task(1, "a", false)));
    assert_eq!(state.tasks(), remote.snapshot().as_slice());
}

#[tokio::test]
async fn failed_delete_keeps_the_task_and_the_edit() {
    let remote = FakeRemote::with_tasks(vec![task(1, "a", false)]);
    let mut state = started(&remote).await;
    dispatch(&mut state, &remote, Msg::EditTask(TaskId(1))).await;

    remote.fail_next(TodoError::Network("timed out".into()));
    dispatch(&mut state, &remote, Msg::DeleteTask(TaskId(1))).await;

    assert_eq!(state.tasks(), &[task(1, "a", false)]);
    assert!(state.edit().is_editing(TaskId(1)));
}

#[tokio::test]
async fn double_toggle_sends_the_same_value_twice() {
    let remote = FakeRemote::with_tasks(vec![task(1, "a", false)]);
    let mut state = started(&remote).await;

    // Nothing changes locally until a response arrives, so the second toggle
    // reads the same stale value as the first.
    let first = state.apply(Msg::ToggleTask(TaskId(1)));
    let second = state.apply(Msg::ToggleTask(TaskId(1)));
    assert_eq!(first, second);

    let mut responses = Vec::new();
    for effect in first.into_iter().chain(second) {
        responses.push(perform(remote.clone(), effect).await);
    }
    for response in responses.into_iter().rev() {
        state.apply(response);
    }

    assert!(state.tasks()[0].completed);
    assert!(!state.is_in_flight(TaskId(1)));
}

#[tokio::test]
async fn later_arriving_response_wins() {
    let remote = FakeRemote::with_tasks(vec![task(1, "a", false)]);
    let mut state = started(&remote).await;

    let toggle = state.apply(Msg::ToggleTask(TaskId(1)));
    state.apply(Msg::EditTask(TaskId(1)));
    state.apply(Msg::SetEditTitle("a2".into()));
    let rename = state.apply(Msg::SaveEdit);

    let [Effect::Update { task: toggled, .. }] = toggle.as_slice() else {
        panic!("expected one update, got {toggle:?}");
    };
    let [Effect::Update { task: renamed, .. }] = rename.as_slice() else {
        panic!("expected one update, got {rename:?}");
    };
    assert_eq!(toggled, &task(1, "a", true));
    assert_eq!(renamed, &task(1, "a2", false));

    // The remote handles the rename first, then the toggle; the client sees
    // the answers the other way round.
    let renamed_msg = perform(remote.clone(), rename[0].clone()).await;
    let toggled_msg = perform(remote.clone(), toggle[0].clone()).await;
    state.apply(toggled_msg);
    state.apply(renamed_msg);

    assert_eq!(state.tasks(), &[task(1, "a2", false)]);
    assert_eq!(remote.snapshot(), vec![task(1, "a", true)]);
}

#[tokio::test]
async fn create_stored_before_the_initial_fetch_appears_once() {
    let remote = FakeRemote::with_tasks(vec![task(1, "a", false)]);
    let mut state = TodoState::new();

    let load = state.apply(Msg::LoadTasks);
    state.apply(Msg::SetNewTaskTitle("x".into()));
    let create = state.apply(Msg::CreateTask);

    // The remote stores the new task first, so the fetch already contains it.
    let created = perform(remote.clone(), create[0].clone()).await;
    let loaded = perform(remote.clone(), load[0].clone()).await;
    state.apply(loaded);
    state.apply(created);

    assert_eq!(state.tasks(), remote.snapshot().as_slice());
    assert_eq!(state.tasks(), &[task(1, "a", false), task(2, "x", false)]);

    dispatch(&mut state, &remote, Msg::DeleteTask(TaskId(2))).await;
    assert_eq!(state.tasks(), &[task(1, "a", false)]);
    assert_eq!(state.tasks(), remote.snapshot().as_slice());
}
