//! # HTTP Backend
//!
//! `reqwest` implementation of [`CatalogSource`] and [`CartStore`] for the
//! storefront REST API.

use super::{CartStore, CatalogSource, StoreError};
use crate::model::{Product, ProductId, RawCartEntry, Session};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpsertRequest<'a> {
    product_id: &'a ProductId,
    qty: u32,
}

/// Failure body returned by the backend: `{ "success": false, "message": "..." }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the storefront REST API rooted at `endpoint`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Unreachable(format!("invalid response body: {e}")));
    }

    let fallback = status
        .canonical_reason()
        .unwrap_or("request rejected")
        .to_string();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or(fallback);
    warn!(status = status.as_u16(), %message, "Backend returned an error");

    match status {
        StatusCode::UNAUTHORIZED => Err(StoreError::Unauthenticated),
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => Err(StoreError::ValidationRejected {
            status: status.as_u16(),
            message,
        }),
        _ => Err(StoreError::Unreachable(format!("{status}: {message}"))),
    }
}

#[async_trait]
impl CatalogSource for HttpBackend {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        debug!("Sending request");
        self.send(self.http.get(self.url("/products"))).await
    }

    #[instrument(skip(self))]
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, StoreError> {
        debug!("Sending request");
        let request = self
            .http
            .get(self.url("/products/search"))
            .query(&[("value", query)]);
        self.send(request).await
    }
}

#[async_trait]
impl CartStore for HttpBackend {
    #[instrument(skip_all)]
    async fn fetch(&self, session: &Session) -> Result<Option<Vec<RawCartEntry>>, StoreError> {
        let Some(token) = session.bearer() else {
            debug!("No token, skipping cart fetch");
            return Ok(None);
        };
        let request = self.http.get(self.url("/cart")).bearer_auth(token);
        self.send(request).await.map(Some)
    }

    #[instrument(skip(self, session))]
    async fn upsert(
        &self,
        session: &Session,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<RawCartEntry>, StoreError> {
        let token = session.bearer().ok_or(StoreError::Unauthenticated)?;
        debug!(qty, "Sending request");
        let request = self
            .http
            .post(self.url("/cart"))
            .bearer_auth(token)
            .json(&UpsertRequest { product_id, qty });
        self.send(request).await
    }
}
