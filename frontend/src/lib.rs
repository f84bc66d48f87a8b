pub mod api;
pub mod config;
pub mod edit;
pub mod effects;
pub mod error;
pub mod filter;
pub mod preference;
pub mod state;
pub mod store;

#[cfg(target_arch = "wasm32")]
pub mod app;

pub use api::TaskApi;
pub use config::ApiConfig;
pub use error::{Result, TodoError};
pub use filter::Filter;
pub use state::{Effect, Msg, TodoState, UpdateOrigin};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    use sauron::prelude::Program;

    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    tracing::info!("starting to-do frontend");
    Program::mount_to_body(app::Model::new(ApiConfig::default()));
}
