use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{NewOrder, NewProduct, NewSupplier, Order, Product, Supplier};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

const GENERIC_BACKEND_MESSAGE: &str = "API error";

/// The single error kind of the transport layer. Every flow bubbles one of
/// these up to the UI action that started it; nothing is recovered locally.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The backend answered with a non-success status. The message is the
    /// backend's `message` field when the error body carries one.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("request failed: {source}")]
    Http {
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid response payload: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Unwrap the `{ "data": ... }` success envelope.
pub(crate) fn decode_data<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RequestError> {
    let envelope: Envelope<T> =
        serde_json::from_slice(bytes).map_err(|source| RequestError::Decode { source })?;
    Ok(envelope.data)
}

/// Build the error for a non-success response, extracting the backend's
/// `message` field when the body has one.
pub(crate) fn backend_error(status: u16, bytes: &[u8]) -> RequestError {
    let message = serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| GENERIC_BACKEND_MESSAGE.to_string());
    RequestError::Backend { status, message }
}

/// Transport helper: the one client mediating all backend calls. It attaches
/// the JSON content-type, serializes bodies, and parses response envelopes.
/// It returns typed results and never talks to the user; presentation is the
/// call sites' concern.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| RequestError::Http { source })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request_bytes(
        &self,
        path: &str,
        method: Method,
        body: Option<&serde_json::Value>,
    ) -> Result<Vec<u8>, RequestError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .client
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req
            .send()
            .await
            .map_err(|source| RequestError::Http { source })?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|source| RequestError::Http { source })?;
        if !status.is_success() {
            return Err(backend_error(status.as_u16(), &bytes));
        }
        Ok(bytes.to_vec())
    }

    /// One round trip: relative path, method (GET for reads), optional JSON
    /// body, enveloped payload out.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<&serde_json::Value>,
    ) -> Result<T, RequestError> {
        let bytes = self.request_bytes(path, method, body).await?;
        decode_data(&bytes)
    }

    /// A round trip whose payload the caller does not need (deletes).
    pub async fn request_unit(
        &self,
        path: &str,
        method: Method,
        body: Option<&serde_json::Value>,
    ) -> Result<(), RequestError> {
        self.request_bytes(path, method, body).await?;
        Ok(())
    }

    fn to_body<B: serde::Serialize>(body: &B) -> Result<serde_json::Value, RequestError> {
        serde_json::to_value(body).map_err(|source| RequestError::Decode { source })
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, RequestError> {
        self.request("/products", Method::GET, None).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, RequestError> {
        self.request(&format!("/products/{id}"), Method::GET, None)
            .await
    }

    pub async fn create_product(&self, draft: &NewProduct) -> Result<Product, RequestError> {
        let body = Self::to_body(draft)?;
        self.request("/products", Method::POST, Some(&body)).await
    }

    pub async fn update_product(
        &self,
        id: &str,
        draft: &NewProduct,
    ) -> Result<Product, RequestError> {
        let body = Self::to_body(draft)?;
        self.request(&format!("/products/{id}"), Method::PUT, Some(&body))
            .await
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), RequestError> {
        self.request_unit(&format!("/products/{id}"), Method::DELETE, None)
            .await
    }

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, RequestError> {
        self.request("/suppliers", Method::GET, None).await
    }

    pub async fn create_supplier(&self, draft: &NewSupplier) -> Result<Supplier, RequestError> {
        let body = Self::to_body(draft)?;
        self.request("/suppliers", Method::POST, Some(&body)).await
    }

    pub async fn delete_supplier(&self, id: &str) -> Result<(), RequestError> {
        self.request_unit(&format!("/suppliers/{id}"), Method::DELETE, None)
            .await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, RequestError> {
        self.request("/orders", Method::GET, None).await
    }

    pub async fn create_order(&self, draft: &NewOrder) -> Result<Order, RequestError> {
        let body = Self::to_body(draft)?;
        self.request("/orders", Method::POST, Some(&body)).await
    }

    pub async fn delete_order(&self, id: &str) -> Result<(), RequestError> {
        self.request_unit(&format!("/orders/{id}"), Method::DELETE, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_uses_message_field() {
        let err = backend_error(400, br#"{"message":"SKU exists"}"#);
        assert_eq!(err.to_string(), "SKU exists");
    }

    #[test]
    fn backend_error_falls_back_on_unparseable_body() {
        let err = backend_error(502, b"<html>bad gateway</html>");
        assert_eq!(err.to_string(), GENERIC_BACKEND_MESSAGE);
        let err = backend_error(500, br#"{"error":"no message field"}"#);
        assert_eq!(err.to_string(), GENERIC_BACKEND_MESSAGE);
    }

    #[test]
    fn decode_data_requires_envelope() {
        let ok: Result<Vec<u32>, _> = decode_data(br#"{"data":[1,2,3]}"#);
        assert_eq!(ok.unwrap(), vec![1, 2, 3]);
        let bare: Result<Vec<u32>, _> = decode_data(br#"[1,2,3]"#);
        assert!(matches!(bare, Err(RequestError::Decode { .. })));
    }
}
