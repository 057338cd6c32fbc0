use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::models::{ExtractedTransaction, TransactionOptions};
use super::RelayError;
use crate::pagination::MAX_PAGE_SIZE;

/// Client for the PeFi record API, authenticated with the shared API key.
pub struct PefiClient {
    http: Client,
    base_url: String,
    api_key: Secret<String>,
}

#[derive(Deserialize)]
struct Page<T> {
    data: Vec<T>,
}

#[derive(Deserialize)]
struct Named {
    name: String,
}

impl PefiClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: Secret<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RelayError> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, path))
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    async fn names(&self, resource: &str) -> Result<Vec<String>, RelayError> {
        let page: Page<Named> = self
            .get(&format!("{resource}?pageSize={MAX_PAGE_SIZE}"))
            .await?;
        Ok(page.data.into_iter().map(|n| n.name).collect())
    }

    /// Category names, method labels and fund names, fetched concurrently.
    pub async fn transaction_options(&self) -> Result<TransactionOptions, RelayError> {
        let (categories, methods, funds) = tokio::try_join!(
            self.names("categories"),
            self.get::<Vec<String>>("methods"),
            self.names("funds"),
        )?;

        Ok(TransactionOptions {
            categories,
            methods,
            funds,
        })
    }

    /// Record an accepted proposal. Returns the created transaction as sent back by the API.
    pub async fn create_transaction(
        &self,
        transaction: &ExtractedTransaction,
    ) -> Result<Value, RelayError> {
        let response = self
            .http
            .post(format!("{}/transactions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(transaction)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }
}

/// Turn a non-2xx reply into an error carrying the API's own message.
async fn check(response: Response) -> Result<Response, RelayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: Value = response.json().await.unwrap_or(Value::Null);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string());

    Err(RelayError::Api(message))
}
