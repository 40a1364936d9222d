use async_trait::async_trait;
use std::fmt::Display;

use futures::stream::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    RawChunkStream, SummaryProvider, SummaryProviderError, SummaryRequest,
};
use crate::domain::RawChunk;
use crate::presentation::config::LlmSettings;

/// Summary provider backed by an OpenAI-compatible `chat/completions`
/// endpoint in streaming mode.
pub struct StreamingSummaryClient {
    client: Client,
    provider: String,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
    system_prompt_template: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<ChunkError>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChunkError {
    message: String,
}

impl StreamingSummaryClient {
    fn build_messages(&self, request: &SummaryRequest) -> Vec<ChatMessage> {
        let system_content = self
            .system_prompt_template
            .replace("{doctor_id}", &request.doctor_id)
            .replace("{patient_id}", &request.patient_id);
        vec![
            ChatMessage {
                role: "system",
                content: system_content,
            },
            ChatMessage {
                role: "user",
                content: request.source_text.clone(),
            },
        ]
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.provider == "azure" {
            request.header("api-key", &self.api_key)
        } else {
            request.header("Authorization", format!("Bearer {}", self.api_key))
        }
    }
}

#[async_trait]
impl SummaryProvider for StreamingSummaryClient {
    #[tracing::instrument(skip(self, request), fields(model = %self.model, provider = %self.provider))]
    async fn stream_summary(
        &self,
        request: &SummaryRequest,
    ) -> Result<RawChunkStream, SummaryProviderError> {
        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: self.build_messages(request),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: true,
        };

        let http_request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request_body);
        let response = self
            .apply_auth(http_request)
            .send()
            .await
            .map_err(|e| SummaryProviderError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SummaryProviderError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummaryProviderError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        Ok(decode_event_stream(response.bytes_stream()))
    }
}

/// Turns the raw response body into chunks, one SSE line at a time. A final
/// line without a trailing newline is still parsed once the body ends.
fn decode_event_stream<S, B, E>(body: S) -> RawChunkStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let mut body = Box::pin(body);

    Box::pin(async_stream::stream! {
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(next) = body.next().await {
            let data = match next {
                Ok(data) => data,
                Err(e) => {
                    yield Err(SummaryProviderError::ApiRequestFailed(e.to_string()));
                    return;
                }
            };
            buffer.extend_from_slice(data.as_ref());

            // Split on raw bytes so multi-byte characters spanning reads stay intact.
            while let Some(newline) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline).collect();
                match parse_sse_line(&String::from_utf8_lossy(&line)) {
                    Some(Ok(chunk)) => {
                        let terminal = chunk.is_terminal();
                        yield Ok(chunk);
                        if terminal {
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        yield Err(e);
                        return;
                    }
                    None => {}
                }
            }
        }

        if let Some(parsed) = parse_sse_line(&String::from_utf8_lossy(&buffer)) {
            yield parsed;
        }
    })
}

/// Parses one line of an OpenAI-style event stream. Returns `None` for
/// blank lines, comments, and deltas without text.
fn parse_sse_line(line: &str) -> Option<Result<RawChunk, SummaryProviderError>> {
    let data = line.trim().strip_prefix("data:")?.trim();
    if data.is_empty() {
        return None;
    }
    if data == "[DONE]" {
        return Some(Ok(RawChunk::Completed));
    }

    let chunk = match serde_json::from_str::<ChatCompletionChunk>(data) {
        Ok(chunk) => chunk,
        Err(e) => return Some(Err(SummaryProviderError::InvalidResponse(e.to_string()))),
    };

    if let Some(error) = chunk.error {
        return Some(Ok(RawChunk::Failed(error.message)));
    }

    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty())
        .map(|content| Ok(RawChunk::Content(content)))
}

pub fn create_streaming_summary_client(
    settings: &LlmSettings,
) -> Result<StreamingSummaryClient, SummaryProviderError> {
    let base_url = match settings.provider.as_str() {
        "openai" => settings
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
            .trim_end_matches('/')
            .to_string(),
        "lmstudio" => settings
            .base_url
            .clone()
            .ok_or_else(|| {
                SummaryProviderError::Configuration(
                    "base_url required for lmstudio provider".to_string(),
                )
            })?
            .trim_end_matches('/')
            .to_string(),
        "azure" => {
            let endpoint = settings.azure_endpoint.as_ref().ok_or_else(|| {
                SummaryProviderError::Configuration(
                    "azure_endpoint required for azure provider".to_string(),
                )
            })?;
            format!(
                "{}/openai/deployments/{}",
                endpoint.trim_end_matches('/'),
                settings.chat_model
            )
        }
        _ => {
            return Err(SummaryProviderError::Configuration(format!(
                "unknown provider: {}",
                settings.provider
            )));
        }
    };

    Ok(StreamingSummaryClient {
        client: Client::new(),
        provider: settings.provider.clone(),
        base_url,
        api_key: settings.api_key.clone(),
        model: settings.chat_model.clone(),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
        system_prompt_template: settings.system_prompt.clone(),
    })
}
