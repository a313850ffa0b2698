//! The single point of entry for the chat-completion API. Nothing else in the crate talks to the
//! network: the enhancement flow and the guidance panels only see the `ChatCompletion` trait.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const MAX_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.7;

/// The system prompt used when the caller has no more specific one.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful career counselor and mental health assistant.";

/// Why a completion could not be obtained.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("the GROQ_API_KEY environment variable is not set, an API key can be obtained from https://console.groq.com/")]
    MissingCredentials,

    #[error("the request timed out, please try again")]
    Timeout,

    #[error("the connection failed, please check your internet connection")]
    Connection,

    #[error("the API key was rejected, please check your GROQ_API_KEY")]
    InvalidCredentials,

    #[error("the rate limit has been exceeded, please try again later")]
    RateLimited,

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid response from the API: {0}")]
    MalformedResponse(String),

    #[error("the request could not be performed: {0}")]
    Request(String),
}

/// Something able to answer a user message under a system prompt.
pub trait ChatCompletion {
    fn complete(&self, message: &str, system_prompt: &str) -> Result<String, ChatError>;
}

/// How to reach the API. Read from the environment, after loading the `.env` file if present.
#[derive(Debug, Clone)]
pub struct ChatConfiguration {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for ChatConfiguration {
    fn default() -> Self {
        ChatConfiguration {
            api_key: None,
            api_url: DEFAULT_API_URL.into(),
            model: DEFAULT_MODEL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl ChatConfiguration {
    /// Reads `GROQ_API_KEY`, `GROQ_API_URL`, `GROQ_MODEL` and `GROQ_TIMEOUT_SECONDS`.
    /// A missing key is not an error here, only the requests fail without it.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ChatConfiguration::default();
        let timeout = match std::env::var("GROQ_TIMEOUT_SECONDS") {
            Ok(seconds) => match seconds.parse::<u64>() {
                Ok(seconds) => Duration::from_secs(seconds),
                Err(error) => {
                    log::warn!(
                        "Ignoring the invalid GROQ_TIMEOUT_SECONDS {:?}: {}",
                        seconds,
                        error
                    );
                    defaults.timeout
                }
            },
            Err(_) => defaults.timeout,
        };

        ChatConfiguration {
            api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|api_key| !api_key.trim().is_empty()),
            api_url: std::env::var("GROQ_API_URL").unwrap_or(defaults.api_url),
            model: std::env::var("GROQ_MODEL").unwrap_or(defaults.model),
            timeout,
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionReply,
}

#[derive(Debug, Deserialize)]
struct CompletionReply {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// A client of the Groq chat-completion API (which follows the OpenAI wire format).
pub struct GroqClient {
    client: Client,
    configuration: ChatConfiguration,
}

impl GroqClient {
    pub fn new(configuration: ChatConfiguration) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(configuration.timeout)
            .build()
            .map_err(|error| ChatError::Request(error.to_string()))?;

        Ok(GroqClient {
            client,
            configuration,
        })
    }
}

impl ChatCompletion for GroqClient {
    fn complete(&self, message: &str, system_prompt: &str) -> Result<String, ChatError> {
        let api_key = self
            .configuration
            .api_key
            .as_deref()
            .ok_or(ChatError::MissingCredentials)?;

        let request_body = CompletionRequest {
            model: &self.configuration.model,
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: system_prompt,
                },
                CompletionMessage {
                    role: "user",
                    content: message,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        log::debug!(
            "Requesting a completion from {} with the model {}",
            self.configuration.api_url,
            self.configuration.model
        );
        let response = self
            .client
            .post(&self.configuration.api_url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response.text().map_err(classify_transport_error)?;
        if !status.is_success() {
            let error = classify_status(status, &body);
            log::warn!("The completion request failed: {}", error);
            return Err(error);
        }

        extract_reply(&body)
    }
}

fn classify_transport_error(error: reqwest::Error) -> ChatError {
    if error.is_timeout() {
        ChatError::Timeout
    } else if error.is_connect() {
        ChatError::Connection
    } else {
        ChatError::Request(error.to_string())
    }
}

/// Maps an unsuccessful status to its error, taking the message out of the body when the API
/// returned a structured error.
fn classify_status(status: StatusCode, body: &str) -> ChatError {
    match status.as_u16() {
        401 => ChatError::InvalidCredentials,
        429 => ChatError::RateLimited,
        _ => {
            let message = serde_json::from_str::<ApiErrorResponse>(body)
                .map(|error_response| error_response.error.message)
                .unwrap_or_else(|_| body.trim().to_string());
            ChatError::Http {
                status: status.as_u16(),
                message,
            }
        }
    }
}

/// Takes the content of the first choice out of a successful response body.
fn extract_reply(body: &str) -> Result<String, ChatError> {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|error| ChatError::MalformedResponse(error.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(ChatError::MalformedResponse(
            "the response contains no choices".into(),
        ))
}
