//! Outbound game-result notifications.

use crate::settings::TelegramConfig;
use async_trait::async_trait;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// Sends a human-readable message somewhere outside the game.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `message`.
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Posts messages to a chat through the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramNotifier {
    /// Creates a notifier with a default HTTP client.
    #[instrument(skip(config))]
    pub fn new(config: TelegramConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Creates a notifier that sends through `client`.
    #[instrument(skip(config, client))]
    pub fn with_client(config: TelegramConfig, client: reqwest::Client) -> Self {
        info!(configured = config.is_configured(), "Creating Telegram notifier");
        Self { config, client }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base().trim_end_matches('/'),
            self.config.bot_token()
        )
    }

    /// Sends `text` to the configured chat.
    ///
    /// Fails without a request when the token or chat id is missing. The
    /// `ok` flag of the API response decides success; its `description`
    /// becomes the error message on failure.
    #[instrument(skip(self, text), fields(chat_id = %self.config.chat_id(), text_len = text.len()))]
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        if !self.config.is_configured() {
            warn!("Telegram credentials missing");
            return Err(NotifyError::new("Settings missing".to_string()));
        }

        let body = SendMessageRequest {
            chat_id: self.config.chat_id(),
            text,
        };

        debug!("Sending message to Telegram");
        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!(error = %e, "Telegram request failed");
                NotifyError::new(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            let e = e.without_url();
            error!(error = %e, "Failed to read Telegram response");
            NotifyError::new(format!("Failed to read response: {}", e))
        })?;

        let parsed: ApiResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!(%status, error = %e, "Failed to parse Telegram response");
            NotifyError::new(format!("Failed to parse response ({}): {}", status, e))
        })?;

        if !parsed.ok {
            let message = parsed
                .description
                .unwrap_or_else(|| "Failed to send message".to_string());
            error!(%status, %message, "Telegram API error");
            return Err(NotifyError::new(message));
        }

        info!("Message delivered");
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        self.send_message(message).await
    }
}

/// Notification error.
#[derive(Debug, Clone, Display, Error)]
#[display("Notify error: {} at {}:{}", message, file, line)]
pub struct NotifyError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl NotifyError {
    /// Creates a new notification error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
