use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use todo_shared::Task;

use crate::api::FetchClient;
use crate::config::ApiConfig;
use crate::effects::perform;
use crate::filter::Filter;
use crate::preference::{DisplayPreference, LocalStorage, Theme};
use crate::state::{Effect, Msg, RowAction, TodoState};

#[derive(Debug, Clone)]
pub enum AppMsg {
    Todo(Msg),
    ToggleTheme,
}

pub struct Model {
    state: TodoState,
    api: FetchClient,
    preference: DisplayPreference<LocalStorage>,
}

impl Model {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            state: TodoState::new(),
            api: FetchClient::new(config),
            preference: DisplayPreference::load(LocalStorage),
        }
    }

    fn dispatch(&mut self, msg: Msg) -> Cmd<AppMsg> {
        let effects = self.state.apply(msg);
        self.run(effects)
    }

    fn run(&self, effects: Vec<Effect>) -> Cmd<AppMsg> {
        if effects.is_empty() {
            return Cmd::none();
        }
        Cmd::batch(
            effects
                .into_iter()
                .map(|effect| {
                    let api = self.api.clone();
                    Cmd::new(async move { AppMsg::Todo(perform(api, effect).await) })
                })
                .collect::<Vec<_>>(),
        )
    }
}

impl Application for Model {
    type MSG = AppMsg;

    fn init(&mut self) -> Cmd<AppMsg> {
        apply_theme(self.preference.theme());
        self.dispatch(Msg::LoadTasks)
    }

    fn update(&mut self, msg: AppMsg) -> Cmd<AppMsg> {
        match msg {
            AppMsg::Todo(msg) => self.dispatch(msg),
            AppMsg::ToggleTheme => {
                let dark = !self.preference.get();
                if let Err(error) = self.preference.set(dark) {
                    tracing::warn!(%error, "display preference not saved");
                }
                apply_theme(self.preference.theme());
                Cmd::none()
            }
        }
    }

    fn view(&self) -> Node<AppMsg> {
        let theme = self.preference.theme();
        div(
            [class(&format!("app-container {}", theme.class_name()))],
            [
                h2([], [text("To-Do List")]),
                button(
                    [class("theme-toggle"), on_click(|_| AppMsg::ToggleTheme)],
                    [text(theme.toggle_label())],
                ),
                self.view_error(),
                self.view_create_form(),
                self.view_filters(),
                if self.state.is_loading() {
                    p([class("loading")], [text("Loading...")])
                } else {
                    self.view_task_list()
                },
                self.view_footer(),
            ],
        )
    }
}

impl Model {
    fn view_error(&self) -> Node<AppMsg> {
        match self.state.last_error() {
            Some(failure) => div(
                [class("error-banner")],
                [
                    span([], [text(&failure.to_string())]),
                    button(
                        [on_click(|_| AppMsg::Todo(Msg::DismissError))],
                        [text("✕")],
                    ),
                ],
            ),
            None => span([], []),
        }
    }

    fn view_create_form(&self) -> Node<AppMsg> {
        div(
            [class("input-container")],
            [
                input(
                    [
                        r#type("text"),
                        placeholder("Add a new task..."),
                        value(self.state.new_task_title()),
                        on_input(|event| AppMsg::Todo(Msg::SetNewTaskTitle(event.value()))),
                    ],
                    [],
                ),
                button(
                    [
                        on_click(|_| AppMsg::Todo(Msg::CreateTask)),
                        disabled(self.state.is_creating()),
                    ],
                    [text("Add Task")],
                ),
            ],
        )
    }

    fn view_filters(&self) -> Node<AppMsg> {
        let current = self.state.filter();
        div(
            [class("filter-buttons")],
            Filter::ALL
                .into_iter()
                .map(|filter| {
                    button(
                        [
                            on_click(move |_| AppMsg::Todo(Msg::SetFilter(filter))),
                            class(if filter == current { "active" } else { "" }),
                        ],
                        [text(filter.label())],
                    )
                })
                .collect::<Vec<_>>(),
        )
    }

    fn view_task_list(&self) -> Node<AppMsg> {
        ul(
            [],
            self.state
                .visible_tasks()
                .into_iter()
                .map(|task| self.view_task(task))
                .collect::<Vec<_>>(),
        )
    }

    fn view_task(&self, task: &Task) -> Node<AppMsg> {
        let task_id = task.id;
        let is_editing = self.state.edit().is_editing(task_id);
        let in_flight = self.state.is_in_flight(task_id);

        li(
            [
                key(task_id.to_string()),
                class(&format!(
                    "{} {}",
                    if task.completed { "completed" } else { "" },
                    if in_flight { "unconfirmed" } else { "" }
                )),
            ],
            [
                input(
                    [
                        r#type("checkbox"),
                        checked(task.completed),
                        on_click(move |_| AppMsg::Todo(Msg::ToggleTask(task_id))),
                    ],
                    [],
                ),
                if is_editing {
                    input(
                        [
                            r#type("text"),
                            value(self.state.edit().draft().unwrap_or_default()),
                            on_input(|event| AppMsg::Todo(Msg::SetEditTitle(event.value()))),
                        ],
                        [],
                    )
                } else {
                    span(
                        [
                            class(if task.completed { "title done" } else { "title" }),
                            on_click(move |_| AppMsg::Todo(Msg::ToggleTask(task_id))),
                        ],
                        [text(&task.title)],
                    )
                },
                div(
                    [class("task-buttons")],
                    self.state
                        .row_actions(task_id)
                        .into_iter()
                        .map(|action| {
                            let (msg, label) = match action {
                                RowAction::Edit => (Msg::EditTask(task_id), "Edit"),
                                RowAction::Save => (Msg::SaveEdit, "💾"),
                                RowAction::Cancel => (Msg::CancelEdit, "Cancel"),
                                RowAction::Delete => (
                                    Msg::DeleteTask(task_id),
                                    if in_flight { "⏳" } else { "Delete" },
                                ),
                            };
                            button([on_click(move |_| AppMsg::Todo(msg.clone()))], [text(label)])
                        })
                        .collect::<Vec<_>>(),
                ),
            ],
        )
    }

    fn view_footer(&self) -> Node<AppMsg> {
        let store = self.state.store();
        div(
            [class("footer")],
            [
                span(
                    [],
                    [text(&format!(
                        "{} pending, {} completed",
                        store.pending_count(),
                        store.completed_count()
                    ))],
                ),
                if store.completed_count() > 0 {
                    button(
                        [on_click(|_| AppMsg::Todo(Msg::ClearCompleted))],
                        [text("Clear Completed")],
                    )
                } else {
                    span([], [])
                },
            ],
        )
    }
}

fn apply_theme(theme: Theme) {
    let body = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body());
    if let Some(body) = body {
        if let Err(error) = body
            .style()
            .set_property("background-color", theme.background())
        {
            tracing::warn!(?error, "failed to apply theme");
        }
    }
}
