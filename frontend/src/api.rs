use todo_shared::{NewTask, Task, TaskId};

use crate::error::Result;

/// The remote task store.
///
/// Every call is a single request; the caller decides what to do with the
/// echo. Handles are cheap to clone so a request future can own one.
#[allow(async_fn_in_trait)]
pub trait TaskApi: Clone + 'static {
    async fn fetch_all(&self) -> Result<Vec<Task>>;

    async fn create(&self, task: &NewTask) -> Result<Task>;

    /// Replaces the stored task with `task` and returns what the store kept.
    async fn update(&self, task: &Task) -> Result<Task>;

    async fn delete(&self, id: TaskId) -> Result<()>;
}

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchClient;

#[cfg(target_arch = "wasm32")]
mod fetch {
    use serde::de::DeserializeOwned;
    use todo_shared::{NewTask, Task, TaskId};
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    use super::TaskApi;
    use crate::config::ApiConfig;
    use crate::error::{Result, TodoError};

    /// `TaskApi` over the browser's `fetch`.
    #[derive(Debug, Clone, Default)]
    pub struct FetchClient {
        config: ApiConfig,
    }

    impl FetchClient {
        pub fn new(config: ApiConfig) -> Self {
            Self { config }
        }

        async fn send(&self, method: &str, url: &str, body: Option<String>) -> Result<Response> {
            tracing::debug!(method, url, "sending request");

            let opts = RequestInit::new();
            opts.set_method(method);
            if let Some(body) = &body {
                opts.set_body(&JsValue::from_str(body));
            }

            let request = Request::new_with_str_and_init(url, &opts)
                .map_err(|e| js_failure("failed to create request", e))?;
            if body.is_some() {
                request
                    .headers()
                    .set("Content-Type", "application/json")
                    .map_err(|e| js_failure("failed to set header", e))?;
            }

            let window =
                web_sys::window().ok_or_else(|| TodoError::Network("no window".to_string()))?;
            let response: Response = JsFuture::from(window.fetch_with_request(&request))
                .await
                .map_err(|e| js_failure("failed to send request", e))?
                .into();

            if !response.ok() {
                return Err(TodoError::Server {
                    status: response.status(),
                });
            }
            Ok(response)
        }

        async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
            let promise = response
                .text()
                .map_err(|e| js_failure("failed to read response", e))?;
            let text = JsFuture::from(promise)
                .await
                .map_err(|e| js_failure("failed to read response", e))?
                .as_string()
                .ok_or_else(|| TodoError::Decode("response body is not text".to_string()))?;

            Ok(serde_json::from_str(&text)?)
        }
    }

    impl TaskApi for FetchClient {
        async fn fetch_all(&self) -> Result<Vec<Task>> {
            let response = self.send("GET", &self.config.fetch_url(), None).await?;
            Self::read_json(response).await
        }

        async fn create(&self, task: &NewTask) -> Result<Task> {
            let body = serde_json::to_string(task)?;
            let response = self
                .send("POST", &self.config.create_url(), Some(body))
                .await?;
            Self::read_json(response).await
        }

        async fn update(&self, task: &Task) -> Result<Task> {
            let body = serde_json::to_string(task)?;
            let response = self
                .send("PUT", &self.config.update_url(task.id), Some(body))
                .await?;
            Self::read_json(response).await
        }

        async fn delete(&self, id: TaskId) -> Result<()> {
            self.send("DELETE", &self.config.delete_url(id), None)
                .await?;
            Ok(())
        }
    }

    fn js_failure(context: &str, value: JsValue) -> TodoError {
        TodoError::Network(format!("{context}: {value:?}"))
    }
}
