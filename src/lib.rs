pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

use std::sync::Arc;

pub fn build_state(config: &config::Config) -> anyhow::Result<state::AppState> {
    let client: Arc<dyn state::ChatCompletionClient> = Arc::new(state::MistralClient::new(&config.mistral)?);
    Ok(state::AppState::new(client, config.model.as_str()))
}
