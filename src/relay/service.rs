use reqwest::Client;
use tracing::{error, info, warn};

use super::api_client::PefiClient;
use super::models::{
    CallbackAction, CallbackQuery, ExtractedTransaction, InlineKeyboardMarkup, Message,
    TransactionOptions, Update, Voice,
};
use super::openai::OpenAiClient;
use super::telegram::TelegramClient;
use super::transcode;
use super::RelayError;
use crate::config::BotConfig;

pub const USAGE_HINT: &str =
    "Send me a text or voice message describing a transaction, e.g. \"Lunch 50k cash from Daily\".";
const PROCESS_FAILED: &str = "❌ Failed to process your message. Please try again.";
const ACCEPTED: &str = "✅ Transaction accepted and created!";
const REJECTED: &str = "❌ Transaction rejected.";
const MUTED: &str = "🔕 Preference saved. Future transactions will be created automatically.";

/// Drives one webhook update through transcription, extraction and confirmation.
/// Failures are reported to the chat; nothing here fails the webhook itself.
pub struct Relay {
    telegram: TelegramClient,
    openai: OpenAiClient,
    api: PefiClient,
    ffmpeg_path: String,
}

impl Relay {
    pub fn new(config: &BotConfig) -> Self {
        let http = Client::new();

        Self {
            telegram: TelegramClient::new(
                http.clone(),
                config.telegram_api_url.clone(),
                config.telegram_bot_token.clone(),
            ),
            openai: OpenAiClient::new(
                http.clone(),
                config.openai_api_url.clone(),
                config.openai_api_key.clone(),
                config.transcription_model.clone(),
                config.extraction_model.clone(),
                config.transcription_language.clone(),
            ),
            api: PefiClient::new(http, config.api_url.clone(), config.api_key.clone()),
            ffmpeg_path: config.ffmpeg_path.clone(),
        }
    }

    pub fn telegram(&self) -> &TelegramClient {
        &self.telegram
    }

    pub async fn handle_update(&self, update: Update) {
        if let Some(query) = update.callback_query {
            self.handle_callback(query).await;
        }

        if let Some(message) = update.message {
            self.handle_message(message).await;
        }
    }

    async fn handle_message(&self, message: Message) {
        let chat_id = message.chat.id;

        if let Some(voice) = message.voice {
            self.handle_voice(chat_id, &voice).await;
            return;
        }

        match message.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => self.handle_text(chat_id, text).await,
            _ => self.notify(chat_id, USAGE_HINT).await,
        }
    }

    pub async fn handle_text(&self, chat_id: i64, text: &str) {
        info!(chat_id, "Extracting transaction from text");

        if let Err(e) = self.propose(chat_id, text).await {
            error!("Failed to process message for chat {chat_id}: {e}");
            self.notify(chat_id, PROCESS_FAILED).await;
        }
    }

    pub async fn handle_voice(&self, chat_id: i64, voice: &Voice) {
        info!(chat_id, duration = voice.duration, "Transcribing voice message");

        let transcript = match self.transcribe(voice).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                self.notify(
                    chat_id,
                    "❌ Failed to transcribe the voice message.\nNo speech was recognised.",
                )
                .await;
                return;
            }
            Err(e) => {
                error!("Failed to transcribe voice message for chat {chat_id}: {e}");
                self.notify(
                    chat_id,
                    &format!("❌ Failed to transcribe the voice message.\n{e}"),
                )
                .await;
                return;
            }
        };

        self.notify(chat_id, &format!("📝 Transcription:\n{transcript}"))
            .await;
        self.handle_text(chat_id, &transcript).await;
    }

    async fn transcribe(&self, voice: &Voice) -> Result<String, RelayError> {
        let url = self.telegram.file_url(&voice.file_id).await?;
        let audio = self.telegram.download(&url).await?;

        // Removed together with its contents when dropped.
        let dir = tempfile::tempdir()?;
        let ogg = dir.path().join("voice.ogg");
        let wav = dir.path().join("voice.wav");

        tokio::fs::write(&ogg, &audio).await?;
        transcode::ogg_to_wav(&self.ffmpeg_path, &ogg, &wav).await?;
        let wav_bytes = tokio::fs::read(&wav).await?;

        self.openai.transcribe(wav_bytes, "voice.wav").await
    }

    async fn propose(&self, chat_id: i64, text: &str) -> Result<(), RelayError> {
        let options = match self.api.transaction_options().await {
            Ok(options) => options,
            Err(e) => {
                warn!("Continuing without option lists: {e}");
                self.notify(
                    chat_id,
                    &format!("❌ Failed to fetch data for transaction.\n{e}"),
                )
                .await;
                TransactionOptions::default()
            }
        };

        let extracted = self.openai.extract_transaction(text, &options).await?;
        let proposal = serde_json::to_string_pretty(&extracted)?;

        self.telegram
            .send_message(chat_id, &proposal, Some(&InlineKeyboardMarkup::proposal()))
            .await
    }

    pub async fn handle_callback(&self, query: CallbackQuery) {
        let Some(message) = query.message else {
            warn!("Callback {} has no message attached", query.id);
            return;
        };
        let Some(action) = query.data.as_deref().and_then(CallbackAction::parse) else {
            warn!("Unknown callback data {:?}", query.data);
            return;
        };

        let chat_id = message.chat.id;
        let message_id = message.message_id;

        let reply = match action {
            CallbackAction::Accept => match self.accept(message.text.as_deref()).await {
                Ok(()) => ACCEPTED.to_string(),
                Err(e) => {
                    error!("Failed to create transaction for chat {chat_id}: {e}");
                    format!("❌ Failed to create transaction.\n{e}")
                }
            },
            CallbackAction::Reject => REJECTED.to_string(),
            CallbackAction::Mute => MUTED.to_string(),
        };

        if let Err(e) = self
            .telegram
            .edit_message_text(chat_id, message_id, &reply)
            .await
        {
            error!("Failed to edit message {message_id} in chat {chat_id}: {e}");
        }
    }

    async fn accept(&self, proposal: Option<&str>) -> Result<(), RelayError> {
        let proposal = parse_proposal(proposal)?;
        let created = self.api.create_transaction(&proposal).await?;

        info!(
            "Created transaction {}",
            created.get("id").and_then(|id| id.as_str()).unwrap_or("?")
        );
        Ok(())
    }

    async fn notify(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.telegram.send_message(chat_id, text, None).await {
            error!("Failed to send message to chat {chat_id}: {e}");
        }
    }
}

/// Read back the proposal JSON carried in the message the buttons belong to.
fn parse_proposal(text: Option<&str>) -> Result<ExtractedTransaction, RelayError> {
    let text = text.ok_or_else(|| RelayError::Proposal("message has no text".to_string()))?;
    Ok(serde_json::from_str(text)?)
}
