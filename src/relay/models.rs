//! Telegram update payloads and the structured transaction the model extracts.

use serde::{Deserialize, Serialize};

use crate::transaction::models::TransactionType;

/// An incoming webhook update. Only the parts the relay acts on are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
    pub voice: Option<Voice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Voice {
    pub file_id: String,
    #[serde(default)]
    pub duration: u32,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub data: Option<String>,
    pub message: Option<Message>,
}

/// Envelope every Bot API method replies with.
#[derive(Debug, Deserialize)]
pub struct TelegramResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramFile {
    pub file_id: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

/// Buttons attached to a proposed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Accept,
    Reject,
    /// "Don't ask next time". Acknowledged only; nothing is persisted.
    Mute,
}

impl CallbackAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackAction::Accept => "accept_transaction",
            CallbackAction::Reject => "reject_transaction",
            CallbackAction::Mute => "dont_ask_next_time",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "accept_transaction" => Some(CallbackAction::Accept),
            "reject_transaction" => Some(CallbackAction::Reject),
            "dont_ask_next_time" => Some(CallbackAction::Mute),
            _ => None,
        }
    }
}

impl InlineKeyboardMarkup {
    /// Accept / Reject row shown under every proposal.
    pub fn proposal() -> Self {
        let button = |text: &str, action: CallbackAction| InlineKeyboardButton {
            text: text.to_string(),
            callback_data: action.as_str().to_string(),
        };

        Self {
            inline_keyboard: vec![vec![
                button("✅ Accept", CallbackAction::Accept),
                button("❌ Reject", CallbackAction::Reject),
            ]],
        }
    }
}

/// Transaction fields pulled out of a chat message by the language model.
/// Serialized as-is into the proposal message and read back on Accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    pub note: String,
    pub amount: f64,
    pub method: String,
    pub category: String,
    pub fund: String,
}

/// Names the model may choose from, fetched fresh for every message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionOptions {
    pub categories: Vec<String>,
    pub methods: Vec<String>,
    pub funds: Vec<String>,
}
