use crate::config::MistralSettings;
use crate::error::UpstreamError;
use crate::models::{build_prompt, ChatCompletionRequest, ChatCompletionResponse, QuizRequest, QuizResponse};
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::debug;

const MAX_ERROR_BODY_CHARS: usize = 512;

fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

pub trait ChatCompletionClient: Send + Sync {
    fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> BoxFuture<'static, Result<ChatCompletionResponse, UpstreamError>>;
}

#[derive(Clone)]
pub struct MistralClient {
    http: reqwest::Client,
    api_key: Arc<str>,
    endpoint: Arc<str>,
}

impl MistralClient {
    pub fn new(settings: &MistralSettings) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            api_key: Arc::from(settings.api_key.as_str()),
            endpoint: Arc::from(format!("{}/chat/completions", settings.base_url)),
        })
    }
}

impl ChatCompletionClient for MistralClient {
    fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> BoxFuture<'static, Result<ChatCompletionResponse, UpstreamError>> {
        let http = self.http.clone();
        let api_key = self.api_key.clone();
        let endpoint = self.endpoint.clone();

        Box::pin(async move {
            let response = http
                .post(&*endpoint)
                .bearer_auth(&*api_key)
                .json(&request)
                .send()
                .await
                .map_err(UpstreamError::Unreachable)?;

            let status = response.status();
            let body = response.text().await.map_err(UpstreamError::Unreachable)?;
            debug!(status = status.as_u16(), bytes = body.len(), "chat completion response");

            if !status.is_success() {
                return Err(UpstreamError::Status {
                    status: status.as_u16(),
                    body: truncate_body(&body),
                });
            }

            serde_json::from_str(&body).map_err(|e| UpstreamError::Malformed(e.to_string()))
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ChatCompletionClient>,
    pub model: Arc<str>,
}

impl AppState {
    pub fn new(client: Arc<dyn ChatCompletionClient>, model: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

pub async fn generate_quiz(state: &AppState, request: &QuizRequest) -> Result<QuizResponse, UpstreamError> {
    let prompt = build_prompt(&request.topic, &request.difficulty);
    let completion = state
        .client
        .complete(ChatCompletionRequest::single_user(&*state.model, prompt))
        .await?;
    let quiz = completion.into_first_content()?;
    Ok(QuizResponse { quiz })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("  Unauthorized\n"), "Unauthorized");
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundary() {
        let body = "é".repeat(MAX_ERROR_BODY_CHARS + 100);
        let cut = truncate_body(&body);
        assert_eq!(cut.chars().count(), MAX_ERROR_BODY_CHARS + 3);
        assert!(cut.ends_with("..."));

        let exact = "x".repeat(MAX_ERROR_BODY_CHARS);
        assert_eq!(truncate_body(&exact), exact);
    }
}
