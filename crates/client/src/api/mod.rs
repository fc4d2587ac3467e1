//! Generic API client over the wire protocol.
//!
//! Each request type from `common::protocol` knows how to build its own
//! HTTP request; [`ApiClient::call`] sends it and decodes either the
//! typed response or the server's structured error body.

mod requests;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use common::protocol::ErrorBody;

pub trait ApiRequest {
    type Response: DeserializeOwned;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder;
}

/// Resolve an endpoint path against the base URL
pub(crate) fn endpoint(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    url.set_path(path);
    url
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(remote: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(remote)?;
        let client = Client::builder().build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send a request and decode the typed response. Non-2xx responses
    /// become [`ApiError::Status`] carrying the server's error message.
    pub async fn call<R: ApiRequest>(&self, request: R) -> Result<R::Response, ApiError> {
        let response = request
            .build_request(&self.base_url, &self.client)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(ApiError::Status { status, message });
        }

        Ok(response.json::<R::Response>().await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}
