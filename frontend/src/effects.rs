use crate::api::TaskApi;
use crate::state::{Effect, Msg};

/// Runs one request and turns the answer into the message that applies it.
pub async fn perform<A: TaskApi>(api: A, effect: Effect) -> Msg {
    match effect {
        Effect::FetchAll => Msg::TasksLoaded(api.fetch_all().await),
        Effect::Create(task) => {
            let result = api.create(&task).await;
            Msg::TaskCreated {
                submitted: task,
                result,
            }
        }
        Effect::Update { origin, task } => Msg::TaskUpdated {
            origin,
            id: task.id,
            result: api.update(&task).await,
        },
        Effect::Delete(id) => Msg::TaskDeleted {
            id,
            result: api.delete(id).await,
        },
    }
}
