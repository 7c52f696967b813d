//! Telegram delivery channel.
//!
//! Thin wrapper over the Bot API: one photo upload per post, bounded
//! retries with exponential backoff. The caller only needs success or
//! failure to decide whether to record the post.

use anyhow::{Context, Result};
use aurum_core::AppError;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

pub const TOKEN_ENV: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

const MAX_ATTEMPTS: u32 = 3;
const SEND_TIMEOUT: Duration = Duration::from_secs(60);

pub struct TelegramClient {
    token: String,
    chat_id: String,
    base_url: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token stays out of logs
        f.debug_struct("TelegramClient")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Resolve credentials from optional environment values plus the settings
/// fallback for the chat id. Split out of [`TelegramClient::from_env`] so
/// it is testable without touching process environment.
fn resolve_credentials(
    token: Option<String>,
    chat_id: Option<String>,
    chat_id_fallback: Option<&str>,
) -> Result<(String, String), AppError> {
    let token = token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MissingCredential(TOKEN_ENV))?;
    let chat_id = chat_id
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .or_else(|| chat_id_fallback.map(|c| c.to_string()))
        .filter(|c| !c.is_empty())
        .ok_or(AppError::MissingCredential(CHAT_ID_ENV))?;
    Ok((token, chat_id))
}

/// Delay before retrying a failed attempt: 1 s, 2 s, 4 s.
fn retry_delay(attempt: u32) -> Duration {
    Duration::from_secs(1 << attempt)
}

impl TelegramClient {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            base_url: "https://api.telegram.org".to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Build a client from `TELEGRAM_TOKEN` / `TELEGRAM_CHAT_ID`, falling
    /// back to the configured chat id when the env var is absent.
    pub fn from_env(chat_id_fallback: Option<&str>) -> Result<Self, AppError> {
        let (token, chat_id) = resolve_credentials(
            std::env::var(TOKEN_ENV).ok(),
            std::env::var(CHAT_ID_ENV).ok(),
            chat_id_fallback,
        )?;
        Ok(Self::new(token, chat_id))
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// Upload a photo with its caption, retrying transient failures.
    ///
    /// Returns `Ok(())` only when Telegram acknowledged the post; the
    /// caller must not record the post otherwise.
    pub async fn send_photo(&self, photo: &Path, caption: &str) -> Result<()> {
        let bytes = std::fs::read(photo)
            .with_context(|| format!("Failed to read media file: {}", photo.display()))?;
        let file_name = photo
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "post.jpg".to_string());

        let url = self.method_url("sendPhoto");
        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                tokio::time::sleep(retry_delay(attempt - 1)).await;
            }

            let part = reqwest::multipart::Part::bytes(bytes.clone())
                .file_name(file_name.clone())
                .mime_str("image/jpeg")
                .context("Failed to build multipart body")?;
            let form = reqwest::multipart::Form::new()
                .text("chat_id", self.chat_id.clone())
                .text("caption", caption.to_string())
                .part("photo", part);

            let response = self
                .http
                .post(&url)
                .multipart(form)
                .timeout(SEND_TIMEOUT)
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    debug!(attempt, "photo delivered");
                    return Ok(());
                }
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    let body = resp.text().await.unwrap_or_default();
                    warn!(attempt, status, "telegram rejected the upload");
                    last_error = Some(AppError::DeliveryFailed { status, body }.into());
                }
                Err(err) => {
                    warn!(attempt, error = %err, "telegram request failed");
                    last_error = Some(anyhow::Error::from(err).context("Telegram request failed"));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Telegram delivery failed")))
    }
}
