//! Google Gemini client.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use futures_core::Stream;
use futures_util::future::BoxFuture;
use futures_util::stream::{self, StreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::timeout;

use super::client::{AnswerClient, FragmentStream};
use super::error::AnswerError;
use super::prompt::{build_user_prompt, SYSTEM_INSTRUCTION};
use super::request::QuestionRequest;
use crate::config::SecureString;
use crate::sse::{SseDecoder, SseError, SseEvent};

/// Longest error body kept for display.
const MAX_ERROR_BODY_BYTES: usize = 4096;

/// Finish reasons that mean the model refused or was cut off by a filter.
const BLOCKED_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// Whether the endpoint streams fragments or returns one complete text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Streaming,
    SingleShot,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: SecureString,
    pub mode: ResponseMode,
    pub connect_timeout: Duration,
    /// Limit on waiting for the response headers, and for the whole body
    /// in single-shot mode.
    pub request_timeout: Duration,
    /// Limit on the gap between streamed chunks.
    pub idle_timeout: Duration,
}

pub struct GeminiClient {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, AnswerError> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        let base = self.settings.base_url.trim_end_matches('/');
        let model = &self.settings.model;
        match self.settings.mode {
            ResponseMode::Streaming => {
                format!("{base}/models/{model}:streamGenerateContent?alt=sse")
            }
            ResponseMode::SingleShot => format!("{base}/models/{model}:generateContent"),
        }
    }

    async fn send(&self, request: &QuestionRequest) -> Result<Response, AnswerError> {
        let url = self.endpoint();
        tracing::debug!(
            model = %self.settings.model,
            mode = ?self.settings.mode,
            website = %request.website(),
            style = %request.style(),
            "Sending answer request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.settings.api_key.expose())
            .header(CONTENT_TYPE, "application/json")
            .json(&build_request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = read_capped_body(response).await;
            let message = api_error_message(&body).unwrap_or(body);
            tracing::warn!(status = status.as_u16(), %message, "Answer request rejected");
            return Err(AnswerError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Run `operation` under the request timeout.
    async fn within_request_timeout<T>(
        &self,
        operation: impl Future<Output = Result<T, AnswerError>>,
    ) -> Result<T, AnswerError> {
        match timeout(self.settings.request_timeout, operation).await {
            Ok(result) => result,
            Err(_) => {
                let seconds = self.settings.request_timeout.as_secs();
                tracing::warn!(request_timeout_secs = seconds, "Answer request timed out");
                Err(AnswerError::RequestTimeout { seconds })
            }
        }
    }

    async fn open(&self, request: &QuestionRequest) -> Result<FragmentStream, AnswerError> {
        let response = self.within_request_timeout(self.send(request)).await?;
        match self.settings.mode {
            ResponseMode::Streaming => Ok(sse_fragments(
                response.bytes_stream(),
                self.settings.idle_timeout,
            )),
            ResponseMode::SingleShot => {
                let body = self
                    .within_request_timeout(async move {
                        response.json::<Value>().await.map_err(AnswerError::from)
                    })
                    .await?;
                let text = fragments_from_payload(&body)?.concat();
                if text.is_empty() {
                    return Err(AnswerError::MissingText);
                }
                Ok(Box::pin(stream::once(async move { Ok(text) })))
            }
        }
    }
}

impl AnswerClient for GeminiClient {
    fn stream_answer<'a>(
        &'a self,
        request: &'a QuestionRequest,
    ) -> BoxFuture<'a, Result<FragmentStream, AnswerError>> {
        Box::pin(self.open(request))
    }

    fn name(&self) -> &str {
        &self.settings.model
    }
}

/// Request body for both `generateContent` and `streamGenerateContent`.
pub fn build_request_body(request: &QuestionRequest) -> Value {
    json!({
        "system_instruction": {
            "parts": [{ "text": SYSTEM_INSTRUCTION }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": build_user_prompt(request) }]
        }]
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

/// Pull the answer text out of one response payload (one SSE event, or the
/// whole single-shot body). Thought parts are skipped.
pub fn fragments_from_payload(payload: &Value) -> Result<Vec<String>, AnswerError> {
    let response: GenerateResponse =
        serde_json::from_value(payload.clone()).map_err(|e| AnswerError::Decode {
            reason: e.to_string(),
        })?;

    if let Some(error) = response.error {
        return Err(AnswerError::Api {
            message: error
                .message
                .unwrap_or_else(|| "unknown API error".to_string()),
        });
    }

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(AnswerError::Api {
            message: format!("the question was blocked ({reason})"),
        });
    }

    let mut fragments = Vec::new();
    for candidate in response.candidates {
        if let Some(content) = candidate.content {
            fragments.extend(
                content
                    .parts
                    .into_iter()
                    .filter(|part| !part.thought)
                    .filter_map(|part| part.text)
                    .filter(|text| !text.is_empty()),
            );
        }
        if let Some(reason) = candidate.finish_reason {
            if BLOCKED_FINISH_REASONS.contains(&reason.as_str()) {
                return Err(AnswerError::Api {
                    message: format!("the answer was stopped ({reason})"),
                });
            }
        }
    }
    Ok(fragments)
}

struct SseState<S> {
    bytes: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    failure: Option<AnswerError>,
    idle_timeout: Duration,
    done: bool,
}

impl<S> SseState<S> {
    fn fail(&mut self, error: AnswerError) {
        self.failure = Some(error);
        self.done = true;
    }
}

/// Turn an SSE body into a fragment stream.
///
/// Chunks are decoded as they arrive; a gap longer than `idle_timeout`
/// between chunks ends the stream with [`AnswerError::IdleTimeout`].
/// Fragments decoded before a failure are yielded before the error.
pub fn sse_fragments<S, B, E>(bytes: S, idle_timeout: Duration) -> FragmentStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<AnswerError> + Send + 'static,
{
    let state = SseState {
        bytes: Box::pin(bytes),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        failure: None,
        idle_timeout,
        done: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            if let Some(fragment) = state.pending.pop_front() {
                return Some((Ok(fragment), state));
            }
            if let Some(error) = state.failure.take() {
                return Some((Err(error), state));
            }
            if state.done {
                return None;
            }

            let next = match timeout(state.idle_timeout, state.bytes.next()).await {
                Ok(next) => next,
                Err(_) => {
                    let seconds = state.idle_timeout.as_secs();
                    tracing::warn!(idle_timeout_secs = seconds, "Answer stream idle timeout");
                    state.fail(AnswerError::IdleTimeout { seconds });
                    continue;
                }
            };

            let events = match next {
                Some(Ok(chunk)) => state.decoder.push(chunk.as_ref()),
                Some(Err(e)) => {
                    state.fail(e.into());
                    continue;
                }
                None => {
                    state.done = true;
                    state.decoder.finish().map(|tail| tail.into_iter().collect())
                }
            };

            if let Err(e) = queue_events(&mut state.pending, events) {
                state.fail(e);
            }
        }
    }))
}

fn queue_events(
    pending: &mut VecDeque<String>,
    events: Result<Vec<SseEvent>, SseError>,
) -> Result<(), AnswerError> {
    let events = events.map_err(|e| AnswerError::Decode {
        reason: e.to_string(),
    })?;
    for event in events {
        pending.extend(fragments_from_payload(&event.data)?);
    }
    Ok(())
}

async fn read_capped_body(response: Response) -> String {
    match response.bytes().await {
        Ok(bytes) => {
            let end = bytes.len().min(MAX_ERROR_BODY_BYTES);
            String::from_utf8_lossy(&bytes[..end]).trim().to_string()
        }
        Err(e) => format!("<failed to read body: {e}>"),
    }
}

/// `error.message` from a Google API error body, if it is one.
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
}
