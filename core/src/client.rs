//! Request builder and response interpreter for the Harvest REST API.
//!
//! # Design
//! `HarvestClient` holds only a `ClientConfig` and carries no mutable state
//! between calls. Each resource operation is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The convenience methods run one request through a caller
//! supplied `Transport` and never retry.

use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Synchronous, stateless client for the Harvest API.
#[derive(Debug, Clone)]
pub struct HarvestClient {
    config: ClientConfig,
}

impl HarvestClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a request for `path` relative to the base URL, carrying the
    /// configured default headers.
    pub fn build_request(&self, path: &str, method: HttpMethod) -> HttpRequest {
        let mut request = HttpRequest::new(method, self.config.endpoint(path));
        request.headers = self.config.headers().to_vec();
        debug!(method = %request.method, path = %request.path, "built request");
        request
    }

    /// Send `request` and return the raw response whatever its status.
    ///
    /// The URL is rendered before the transport sees the request, so a bad
    /// base URL is `InvalidUrl` and never reaches the network.
    pub fn execute_raw<T>(&self, transport: &T, request: &HttpRequest) -> Result<HttpResponse>
    where
        T: Transport + ?Sized,
    {
        request.url()?;
        let response = transport.send(request).map_err(|e| {
            error!(method = %request.method, path = %request.path, error = %e, "transport failure");
            ApiError::Transport(e)
        })?;
        debug!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            "received response"
        );
        Ok(response)
    }

    /// Send `request` and deserialize a 2xx JSON body into `R`.
    pub fn execute<T, R>(&self, transport: &T, request: &HttpRequest) -> Result<R>
    where
        T: Transport + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.execute_raw(transport, request)?;
        parse_json(response)
    }
}

/// Map a non-2xx status to `ApiError::Http`.
pub fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "request failed");
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Interpret a response as a JSON document of type `R`.
///
/// An empty 2xx body is a deserialization failure, since a record was expected.
pub fn parse_json<R: DeserializeOwned>(response: HttpResponse) -> Result<R> {
    check_status(&response)?;
    if response.body.trim().is_empty() {
        return Err(ApiError::Deserialization {
            status: response.status,
            body: response.body,
            message: "empty response body".to_string(),
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization {
        status: response.status,
        message: e.to_string(),
        body: response.body,
    })
}
