use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::ApiKey;
use crate::error::{Result, TicketLensError};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Sampling settings sent with every completion request.
#[derive(Debug, Clone)]
pub struct CompletionParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

pub struct ChatClient {
    client: Client,
    completions_url: Url,
    api_key: ApiKey,
}

impl ChatClient {
    pub fn new(base_url: &str, api_key: ApiKey) -> Result<Self> {
        let client = Client::builder()
            .user_agent("TicketLens/0.1.0")
            .build()
            .map_err(|e| TicketLensError::Config(format!("Failed to create HTTP client: {e}")))?;

        // Url::join drops the last path segment unless it ends with a slash.
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let completions_url = Url::parse(&base)
            .map_err(|e| TicketLensError::Config(format!("Invalid base URL: {e}")))?
            .join("chat/completions")
            .map_err(|e| TicketLensError::Config(format!("Invalid API URL: {e}")))?;

        Ok(Self {
            client,
            completions_url,
            api_key,
        })
    }

    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(self.api_key.as_str())
    }

    /// Sends one user message and returns the first choice's text.
    pub async fn complete(&self, prompt: &str, params: &CompletionParams) -> Result<String> {
        let body = ChatRequest {
            model: &params.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        debug!(
            "POST {} (model {}, {} prompt chars)",
            self.completions_url,
            params.model,
            prompt.len()
        );

        let response: ChatResponse = self
            .auth_request(self.client.post(self.completions_url.clone()))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| TicketLensError::Api("response contained no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn params() -> CompletionParams {
        CompletionParams {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.5,
            max_tokens: 400,
        }
    }

    #[test]
    fn test_completions_url_with_and_without_trailing_slash() {
        let with_slash = ChatClient::new("https://api.openai.com/v1/", ApiKey::from("k")).unwrap();
        let without = ChatClient::new("https://api.openai.com/v1", ApiKey::from("k")).unwrap();

        assert_eq!(
            with_slash.completions_url.as_str(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(with_slash.completions_url, without.completions_url);
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = ChatClient::new("not a url", ApiKey::from("k"));

        assert!(matches!(result, Err(TicketLensError::Config(_))));
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 400,
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"first"}},
                               {"message":{"role":"assistant","content":"second"}}]}"#,
            )
            .create_async()
            .await;

        let client = ChatClient::new(&server.url(), ApiKey::from("sk-test")).unwrap();
        let text = client.complete("hello", &params()).await.unwrap();

        assert_eq!(text, "first");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let client = ChatClient::new(&server.url(), ApiKey::from("bad")).unwrap();
        let err = client.complete("hello", &params()).await.unwrap_err();

        assert!(matches!(err, TicketLensError::Network(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = ChatClient::new(&server.url(), ApiKey::from("sk-test")).unwrap();
        let err = client.complete("hello", &params()).await.unwrap_err();

        assert!(matches!(err, TicketLensError::Api(_)));
    }
}
