use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::models::{InlineKeyboardMarkup, TelegramFile, TelegramResponse};
use super::RelayError;

/// Thin Bot API client. The bot token is part of every URL, so request
/// errors are stripped of their URL before they leave this module.
pub struct TelegramClient {
    http: Client,
    api_url: String,
    token: Secret<String>,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

#[derive(Serialize)]
struct EditMessageText<'a> {
    chat_id: i64,
    message_id: i64,
    text: &'a str,
}

impl TelegramClient {
    pub fn new(http: Client, api_url: impl Into<String>, token: Secret<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            token,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url,
            self.token.expose_secret(),
            method
        )
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, RelayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("Calling Telegram method {method}");

        let response: TelegramResponse<T> = self
            .http
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| RelayError::Http(e.without_url()))?
            .json()
            .await
            .map_err(|e| RelayError::Http(e.without_url()))?;

        if !response.ok {
            return Err(RelayError::Telegram(
                response
                    .description
                    .unwrap_or_else(|| format!("{method} failed")),
            ));
        }

        response
            .result
            .ok_or_else(|| RelayError::Telegram(format!("{method} returned no result")))
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), RelayError> {
        let body = SendMessage {
            chat_id,
            text,
            reply_markup,
        };
        self.call::<_, Value>("sendMessage", &body).await?;
        Ok(())
    }

    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<(), RelayError> {
        let body = EditMessageText {
            chat_id,
            message_id,
            text,
        };
        self.call::<_, Value>("editMessageText", &body).await?;
        Ok(())
    }

    /// Resolve a file id to its download URL.
    pub async fn file_url(&self, file_id: &str) -> Result<String, RelayError> {
        let file: TelegramFile = self.call("getFile", &json!({ "file_id": file_id })).await?;
        let path = file.file_path.ok_or_else(|| {
            RelayError::Telegram(format!("file {} has no download path", file.file_id))
        })?;

        Ok(format!(
            "{}/file/bot{}/{}",
            self.api_url,
            self.token.expose_secret(),
            path
        ))
    }

    pub async fn download(&self, url: &str) -> Result<Vec<u8>, RelayError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RelayError::Http(e.without_url()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RelayError::Http(e.without_url()))?;

        Ok(bytes.to_vec())
    }

    /// Register `url` as the webhook and hand back Telegram's raw reply.
    pub async fn set_webhook(&self, url: &str) -> Result<Value, RelayError> {
        let response: Value = self
            .http
            .post(self.method_url("setWebhook"))
            .json(&json!({ "url": url }))
            .send()
            .await
            .map_err(|e| RelayError::Http(e.without_url()))?
            .json()
            .await
            .map_err(|e| RelayError::Http(e.without_url()))?;

        Ok(response)
    }
}
