//! Telegram relay: turns chat text or voice notes into proposed transactions
//! and, once the user accepts, records them through the PeFi API.

pub mod api_client;
pub mod handlers;
pub mod models;
pub mod openai;
pub mod service;
pub mod telegram;
pub mod transcode;

use thiserror::Error;

pub use handlers::configure_relay;
pub use service::Relay;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Telegram API error: {0}")]
    Telegram(String),
    #[error("OpenAI API error: {0}")]
    OpenAi(String),
    #[error("PeFi API error: {0}")]
    Api(String),
    #[error("Audio conversion failed: {0}")]
    Transcode(String),
    #[error("Invalid proposal: {0}")]
    Proposal(String),
}
