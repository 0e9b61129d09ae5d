//! Text-completion providers

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::ProviderError;

pub const TEMPERATURE: f32 = 0.7;

/// A backend that turns one prompt into one completion.
pub trait CompletionProvider: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage; 1],
    temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatResponse {
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// OpenAI-compatible chat-completions client. One request per call, no retries.
pub struct OpenAiProvider {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    url: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str, api_base: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            url: format!("{}/chat/completions", api_base.trim().trim_end_matches('/')),
            timeout,
        })
    }

    /// `None` when no api key is configured (demo mode).
    pub fn from_config(config: &AppConfig) -> Option<Result<Self, ProviderError>> {
        let api_key = config.api_key.as_deref()?;
        Some(Self::new(api_key, &config.model, &config.api_base, config.timeout))
    }
}

impl CompletionProvider for OpenAiProvider {
    fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user".into(),
                content: prompt.into(),
            }],
            temperature: TEMPERATURE,
        };

        debug!(model = %self.model, "sending completion request");
        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    ProviderError::Request(e)
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ProviderError::HttpStatus { status, body });
        }

        let bytes = resp.bytes()?;
        let parsed: ChatResponse = serde_json::from_slice(&bytes)?;
        parsed.first_content().map(str::to_string).ok_or(ProviderError::EmptyChoices)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Level, SentenceGenerator};
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{SocketAddr, TcpListener};
    use std::thread;

    /// Accepts one connection, reads the full request, then writes `response`.
    fn serve_once(response: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap_or(0);
                    }
                }
            }
            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).unwrap();
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });
        addr
    }

    const UNAUTHORIZED: &str =
        "HTTP/1.1 401 Unauthorized\r\nContent-Length: 11\r\nConnection: close\r\n\r\nbad api key";

    #[test]
    fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (_stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_secs(2));
        });

        let base = format!("http://{}/v1", addr);
        let p = OpenAiProvider::new("k", "m", &base, Duration::from_millis(200)).unwrap();
        let err = p.complete("hi").unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(200)), "{err:?}");
        assert_eq!(err.to_string(), "request timed out after 200ms");
    }

    #[test]
    fn unauthorized_is_http_status() {
        let base = format!("http://{}/v1", serve_once(UNAUTHORIZED));
        let p = OpenAiProvider::new("bad", "m", &base, Duration::from_secs(5)).unwrap();
        match p.complete("hi").unwrap_err() {
            ProviderError::HttpStatus { status, body } => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(body, "bad api key");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn unauthorized_is_shown_in_band() {
        let base = format!("http://{}/v1", serve_once(UNAUTHORIZED));
        let p = OpenAiProvider::new("bad", "m", &base, Duration::from_secs(5)).unwrap();
        let mut gen = SentenceGenerator::with_provider(Box::new(p));
        let text = gen.generate("Lucid", "clear", Level::Easy);
        assert_eq!(text, "[Provider error] HTTP 401 Unauthorized: bad api key");
    }

    #[test]
    fn request_shape() {
        let payload = ChatRequest {
            model: "gpt-4o-mini",
            messages: [ChatMessage {
                role: "user".into(),
                content: "hi".into(),
            }],
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn parses_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  A sentence.  "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.first_content(), Some("  A sentence.  "));

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(empty.first_content(), None);
    }

    #[test]
    fn no_key_means_no_provider() {
        assert!(OpenAiProvider::from_config(&AppConfig::default()).is_none());
    }

    #[test]
    fn url_joins_base() {
        let p = OpenAiProvider::new("k", "m", "http://localhost:9/v1/", Duration::from_millis(100)).unwrap();
        assert_eq!(p.url, "http://localhost:9/v1/chat/completions");
    }
}
