use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use astra_core::models::EMPTY_COMPLETION;
use astra_core::{ChatModel, Error, Result, ServiceConfig};
use std::fmt;

pub(crate) const SERVICE: &str = "chat-completion";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<Message>,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_else(|| EMPTY_COMPLETION.to_string())
    }
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint (Groq by default).
pub struct ChatCompletionModel {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl ChatCompletionModel {
    pub fn new(config: &ServiceConfig, model: &str) -> Result<Self> {
        let api_key = config.require_api_key("Chat completion")?.to_string();
        Ok(Self {
            client: config.http_client()?,
            api_key,
            endpoint: config.endpoint("chat/completions"),
            model: model.to_string(),
        })
    }

    async fn send(&self, prompt: &str, max_tokens: u32, json: bool) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            response_format: json.then_some(ResponseFormat { kind: "json_object" }),
        };

        tracing::debug!(model = %self.model, max_tokens, json, "Sending {} byte prompt", prompt.len());

        let response = self.client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Chat completion request failed: {}", body);
            return Err(Error::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(SERVICE, e))?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("malformed chat completion response: {}", e)))?;

        Ok(parsed.into_text())
    }
}

impl fmt::Debug for ChatCompletionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl ChatModel for ChatCompletionModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        self.send(prompt, max_tokens, false).await
    }

    async fn complete_json(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        self.send(prompt, max_tokens, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::{HeaderMap, StatusCode}, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorded {
        requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    async fn spawn_stub(status: StatusCode, reply: &'static str) -> (ServiceConfig, Recorded) {
        let recorded = Recorded::default();
        let app = Router::new()
            .route(
                "/v1/chat/completions",
                post(move |State(rec): State<Recorded>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    rec.requests.lock().unwrap().push((auth, body));
                    (status, reply)
                }),
            )
            .with_state(recorded.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = ServiceConfig::new(&format!("http://{}/v1", addr))
            .unwrap()
            .with_api_key(Some("test-key".to_string()));
        (config, recorded)
    }

    #[test]
    fn test_model_requires_api_key() {
        let config = ServiceConfig::new("http://localhost/v1").unwrap();
        let result = ChatCompletionModel::new(&config, "llama");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let (config, recorded) = spawn_stub(
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":"hello"}},{"message":{"content":"ignored"}}]}"#,
        )
        .await;
        let model = ChatCompletionModel::new(&config, "llama-test").unwrap();

        let text = model.complete("Say hello", 64).await.unwrap();
        assert_eq!(text, "hello");

        let requests = recorded.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (auth, body) = &requests[0];
        assert_eq!(auth.as_deref(), Some("Bearer test-key"));
        assert_eq!(
            body,
            &json!({
                "model": "llama-test",
                "messages": [{"role": "user", "content": "Say hello"}],
                "max_tokens": 64
            })
        );
    }

    #[tokio::test]
    async fn test_complete_json_requests_json_object() {
        let (config, recorded) =
            spawn_stub(StatusCode::OK, r#"{"choices":[{"message":{"content":"{}"}}]}"#).await;
        let model = ChatCompletionModel::new(&config, "llama-test").unwrap();

        assert_eq!(model.complete_json("Extract", 500).await.unwrap(), "{}");
        let requests = recorded.requests.lock().unwrap();
        assert_eq!(requests[0].1["response_format"], json!({"type": "json_object"}));
    }

    #[tokio::test]
    async fn test_missing_content_yields_placeholder() {
        let (config, _) = spawn_stub(StatusCode::OK, r#"{"choices":[]}"#).await;
        let model = ChatCompletionModel::new(&config, "llama-test").unwrap();
        assert_eq!(model.complete("hi", 16).await.unwrap(), EMPTY_COMPLETION);

        let (config, _) = spawn_stub(StatusCode::OK, r#"{"choices":[{"message":{}}]}"#).await;
        let model = ChatCompletionModel::new(&config, "llama-test").unwrap();
        assert_eq!(model.complete("hi", 16).await.unwrap(), EMPTY_COMPLETION);
    }

    #[tokio::test]
    async fn test_non_success_status_is_tagged() {
        let (config, _) = spawn_stub(StatusCode::UNAUTHORIZED, r#"{"error":"invalid key"}"#).await;
        let model = ChatCompletionModel::new(&config, "llama-test").unwrap();

        match model.complete("hi", 16).await {
            Err(Error::UpstreamStatus { service, status, body }) => {
                assert_eq!(service, SERVICE);
                assert_eq!(status, 401);
                assert!(body.contains("invalid key"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let (config, _) = spawn_stub(StatusCode::OK, "<html>gateway</html>").await;
        let model = ChatCompletionModel::new(&config, "llama-test").unwrap();
        assert!(matches!(model.complete("hi", 16).await, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let config = ServiceConfig::new("http://127.0.0.1:9/v1")
            .unwrap()
            .with_api_key(Some("test-key".to_string()));
        let model = ChatCompletionModel::new(&config, "llama-test").unwrap();
        assert!(matches!(
            model.complete("hi", 16).await,
            Err(Error::UpstreamTransport { .. })
        ));
    }
}
