use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::models::{ExtractedTransaction, TransactionOptions};
use super::RelayError;

const SCHEMA_NAME: &str = "create_new_transaction";
const SYSTEM_PROMPT: &str = "Extract specific information from provided text.";

/// Speech-to-text and structured extraction over the OpenAI HTTP API.
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: Secret<String>,
    transcription_model: String,
    extraction_model: String,
    language: String,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl OpenAiClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        api_key: Secret<String>,
        transcription_model: impl Into<String>,
        extraction_model: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
            transcription_model: transcription_model.into(),
            extraction_model: extraction_model.into(),
            language: language.into(),
        }
    }

    /// Transcribe a WAV recording.
    pub async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, RelayError> {
        let file = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")?;

        let form = Form::new()
            .part("file", file)
            .text("model", self.transcription_model.clone())
            .text("language", self.language.clone());

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await?;

        let transcription: TranscriptionResponse = check(response).await?.json().await?;
        Ok(transcription.text)
    }

    /// Ask the model to fill in a transaction from free text, constrained to
    /// the given option lists.
    pub async fn extract_transaction(
        &self,
        text: &str,
        options: &TransactionOptions,
    ) -> Result<ExtractedTransaction, RelayError> {
        let body = extraction_request(&self.extraction_model, text, options);

        let response = self
            .http
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let response: Value = check(response).await?.json().await?;
        let output = output_text(&response)
            .ok_or_else(|| RelayError::OpenAi("response contained no output text".to_string()))?;

        Ok(serde_json::from_str(&output)?)
    }
}

async fn check(response: Response) -> Result<Response, RelayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RelayError::OpenAi(format!("{status}: {body}")))
}

/// Request body for the Responses API.
pub fn extraction_request(model: &str, text: &str, options: &TransactionOptions) -> Value {
    json!({
        "model": model,
        "temperature": 0,
        "input": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": text },
        ],
        "text": {
            "format": {
                "type": "json_schema",
                "name": SCHEMA_NAME,
                "schema": transaction_schema(options),
                "strict": true,
            }
        },
    })
}

/// Strict JSON schema for [`ExtractedTransaction`]. Method, category and fund
/// are limited to the known names; an empty list leaves the field free-form.
pub fn transaction_schema(options: &TransactionOptions) -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": {
                "type": "string",
                "description": "The type of transaction. Default is expense.",
                "enum": ["income", "expense", "transfer"],
            },
            "description": {
                "type": "string",
                "description": "Description of the transaction.",
            },
            "note": {
                "type": "string",
                "description": "Note for the transaction. Optional.",
            },
            "amount": {
                "type": "number",
                "description": "The amount spent on transaction.",
            },
            "method": choice(
                "The payment method used for the transaction.",
                &options.methods,
            ),
            "category": choice("Category of the transaction.", &options.categories),
            "fund": choice("The fund or source of the transaction.", &options.funds),
        },
        "required": ["type", "amount", "method", "category", "fund", "description", "note"],
        "additionalProperties": false,
    })
}

fn choice(description: &str, names: &[String]) -> Value {
    let mut property = Map::new();
    property.insert("type".to_string(), json!("string"));
    property.insert("description".to_string(), json!(description));
    if !names.is_empty() {
        property.insert("enum".to_string(), json!(names));
    }
    Value::Object(property)
}

/// Concatenate the `output_text` parts of a Responses API reply.
pub fn output_text(response: &Value) -> Option<String> {
    if let Some(text) = response.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let text: String = response
        .get("output")?
        .as_array()?
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    (!text.is_empty()).then_some(text)
}
