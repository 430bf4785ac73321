use reqwest::blocking::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::error::GenerationError;
use crate::model::safety::SafetySetting;

/// Sampling parameters sent with a `generateContent` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Fixed story sampling with the caller's temperature.
    pub fn story(temperature: f32) -> Self {
        Self {
            temperature,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 2048,
        }
    }
}

/// The external text generation service.
///
/// `config: None` and an empty `safety` slice leave the service defaults
/// in place.
pub trait TextGenerator: Send {
    fn generate(
        &self,
        prompt: &str,
        config: Option<&GenerationConfig>,
        safety: &[SafetySetting],
    ) -> Result<String, GenerationError>;

    /// Number of models visible to the credential.
    fn list_models(&self) -> Result<usize, GenerationError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<&'a GenerationConfig>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    safety_settings: &'a [SafetySetting],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// One page of `GET /models`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelList {
    #[serde(default)]
    models: Vec<serde_json::Value>,
    next_page_token: Option<String>,
}

/// Blocking client for the Gemini REST API.
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(
        &self,
        prompt: &str,
        config: Option<&GenerationConfig>,
        safety: &[SafetySetting],
    ) -> Result<String, GenerationError> {
        let req = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: config,
            safety_settings: safety,
        };

        let url = self.endpoint(&format!("models/{}:generateContent", self.config.model));
        tracing::debug!(%url, prompt_chars = prompt.chars().count(), "calling generateContent");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.config.api_key.expose_secret())
            .json(&req)
            .send()?;

        let status = resp.status();
        let body = resp.text()?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        extract_text(parsed)
    }

    fn list_models(&self) -> Result<usize, GenerationError> {
        let mut count = 0;
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self
                .client
                .get(self.endpoint("models"))
                .header("x-goog-api-key", self.config.api_key.expose_secret())
                .build()?;
            if let Some(token) = &page_token {
                req.url_mut().query_pairs_mut().append_pair("pageToken", token);
            }

            let resp = self.client.execute(req)?;
            let status = resp.status();
            let body = resp.text()?;

            if !status.is_success() {
                return Err(GenerationError::Status {
                    status: status.as_u16(),
                    message: error_message(&body),
                });
            }

            let page: ModelList = serde_json::from_str(&body)?;
            count += page.models.len();

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => return Ok(count),
            }
        }
    }
}

fn extract_text(resp: GenerateContentResponse) -> Result<String, GenerationError> {
    if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::Blocked { reason });
    }

    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(GenerationError::EmptyResponse);
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if !text.is_empty() {
        return Ok(text);
    }

    match candidate.finish_reason {
        Some(reason) if reason != "STOP" => Err(GenerationError::Blocked { reason }),
        _ => Err(GenerationError::EmptyResponse),
    }
}

/// Prefer the service's own message; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::safety::{SafetyPolicy, SafetyTier};
    use mockito::Matcher;
    use secrecy::SecretString;
    use serde_json::json;

    const PATH: &str = "/models/gemini-1.5-flash:generateContent";

    fn client_for(server: &mockito::ServerGuard) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: SecretString::from("test-key".to_string()),
            base_url: server.url(),
            model: "gemini-1.5-flash".into(),
        })
    }

    fn ok_body(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[test]
    fn sends_prompt_parameters_and_safety() {
        let mut server = mockito::Server::new();
        let policy = SafetyPolicy::default();
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
                "generationConfig": {
                    "temperature": 1.0,
                    "topP": 0.95,
                    "topK": 40,
                    "maxOutputTokens": 2048
                },
                "safetySettings": [
                    { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                    { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                    { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                    { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" }
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ok_body("A story."))
            .create();

        let text = client_for(&server)
            .generate(
                "hello",
                Some(&GenerationConfig::story(1.0)),
                policy.settings_for(SafetyTier::Strict),
            )
            .unwrap();

        assert_eq!(text, "A story.");
        mock.assert();
    }

    #[test]
    fn defaults_omit_config_and_safety() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", PATH)
            .match_body(Matcher::Json(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "analyze" }] }]
            })))
            .with_status(200)
            .with_body(ok_body("fine"))
            .create();

        assert_eq!(
            client_for(&server).generate("analyze", None, &[]).unwrap(),
            "fine"
        );
        mock.assert();
    }

    #[test]
    fn joins_multiple_parts() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(
                json!({
                    "candidates": [{ "content": { "parts": [{ "text": "One " }, { "text": "two." }] } }]
                })
                .to_string(),
            )
            .create();

        assert_eq!(client_for(&server).generate("p", None, &[]).unwrap(), "One two.");
    }

    #[test]
    fn http_error_carries_service_message() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", PATH)
            .with_status(429)
            .with_body(
                json!({ "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" } })
                    .to_string(),
            )
            .create();

        let err = client_for(&server).generate("p", None, &[]).unwrap_err();
        match err {
            GenerationError::Status { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blocked_prompt_is_reported() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string())
            .create();

        let err = client_for(&server).generate("p", None, &[]).unwrap_err();
        assert!(matches!(err, GenerationError::Blocked { reason } if reason == "SAFETY"));
    }

    #[test]
    fn candidate_without_text_is_blocked_by_finish_reason() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(json!({ "candidates": [{ "finishReason": "SAFETY" }] }).to_string())
            .create();

        let err = client_for(&server).generate("p", None, &[]).unwrap_err();
        assert!(matches!(err, GenerationError::Blocked { .. }));
    }

    #[test]
    fn empty_and_malformed_responses_fail() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body("{}")
            .create();
        let err = client_for(&server).generate("p", None, &[]).unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));

        let mut server = mockito::Server::new();
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create();
        let err = client_for(&server).generate("p", None, &[]).unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)));
    }

    #[test]
    fn counts_models() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/models")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body(json!({ "models": [{ "name": "a" }, { "name": "b" }] }).to_string())
            .create();

        assert_eq!(client_for(&server).list_models().unwrap(), 2);
    }

    #[test]
    fn counts_models_across_pages() {
        let mut server = mockito::Server::new();
        let first = server
            .mock("GET", "/models")
            .match_query(Matcher::Missing)
            .with_status(200)
            .with_body(
                json!({ "models": [{ "name": "a" }, { "name": "b" }], "nextPageToken": "page+2" })
                    .to_string(),
            )
            .create();
        let second = server
            .mock("GET", "/models")
            .match_query(Matcher::UrlEncoded("pageToken".into(), "page+2".into()))
            .with_status(200)
            .with_body(json!({ "models": [{ "name": "c" }], "nextPageToken": "" }).to_string())
            .create();

        assert_eq!(client_for(&server).list_models().unwrap(), 3);
        first.assert();
        second.assert();
    }
}
