use todo_shared::TaskId;

pub const DEFAULT_API_BASE: &str = "https://pit3-react-django.onrender.com/api/todos";

/// Where the remote task API lives.
///
/// The browser has no process environment, so the override is taken from
/// `TODO_API_BASE` at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(option_env!("TODO_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetch_url(&self) -> String {
        format!("{}/fetch/", self.base_url)
    }

    pub fn create_url(&self) -> String {
        format!("{}/create/", self.base_url)
    }

    pub fn update_url(&self, id: TaskId) -> String {
        format!("{}/{}/update/", self.base_url, id)
    }

    pub fn delete_url(&self, id: TaskId) -> String {
        format!("{}/{}/delete/", self.base_url, id)
    }
}
