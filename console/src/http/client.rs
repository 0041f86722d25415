//! HTTP client implementation

use std::sync::Arc;
use std::time::Duration;

use openapi_client::models::{ApiEnvelope, ErrorResponse, Pagination};
use reqwest::cookie::Jar;
use reqwest::{header, multipart, Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::errors::ConsoleError;

/// Connection settings for [`HttpClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// REST API root, e.g. `http://localhost:3000/api/v1`
    pub base_url: String,

    /// Auth provider root, e.g. `http://localhost:3000/api/v1/auth`
    pub auth_base_url: String,

    /// Session cookie issued by the auth provider
    pub session_token: Option<SecretString>,

    /// Name of the session cookie
    pub session_cookie: String,

    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api/v1".to_string(),
            auth_base_url: "http://localhost:3000/api/v1/auth".to_string(),
            session_token: None,
            session_cookie: "better-auth.session_token".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for backend communication.
///
/// Every request carries the session cookie; every response is decoded
/// through the `{ success, data, error }` envelope.
pub struct HttpClient {
    client: Client,
    base_url: String,
    auth_base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(options: &ClientOptions) -> Result<Self, ConsoleError> {
        let base_url = options.base_url.trim_end_matches('/').to_string();
        let auth_base_url = options.auth_base_url.trim_end_matches('/').to_string();

        let jar = Arc::new(Jar::default());
        if let Some(token) = &options.session_token {
            let cookie = format!("{}={}", options.session_cookie, token.expose_secret());
            for root in [&base_url, &auth_base_url] {
                let url = Url::parse(root)
                    .map_err(|e| ConsoleError::ConfigError(format!("invalid URL {}: {}", root, e)))?;
                jar.add_cookie_str(&cookie, &url);
            }
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(options.timeout)
            .cookie_provider(jar)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url,
            auth_base_url,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the auth provider URL
    pub fn auth_base_url(&self) -> &str {
        &self.auth_base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Make a GET request and return the envelope's `data`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConsoleError> {
        let envelope = self.execute(Method::GET, path, self.request(Method::GET, path)).await?;
        require_data(path, envelope)
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ConsoleError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path).query(query);
        let envelope = self.execute(Method::GET, path, request).await?;
        require_data(path, envelope)
    }

    /// Make a GET request for a paginated listing
    pub async fn get_page<T, Q>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<(Vec<T>, Option<Pagination>), ConsoleError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path).query(query);
        let envelope: ApiEnvelope<Vec<T>> = self.execute(Method::GET, path, request).await?;
        let pagination = envelope.pagination.clone();
        Ok((require_data(path, envelope)?, pagination))
    }

    /// Make a GET request whose body is not wrapped in an envelope
    pub async fn get_raw<T: DeserializeOwned>(&self, url: &str) -> Result<T, ConsoleError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(failure(Method::GET, url, status, &body));
        }
        decode(url, &body)
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ConsoleError> {
        let request = self.request(Method::POST, path).json(body);
        let envelope = self.execute(Method::POST, path, request).await?;
        require_data(path, envelope)
    }

    /// Make a POST request without a body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConsoleError> {
        let envelope = self
            .execute(Method::POST, path, self.request(Method::POST, path))
            .await?;
        require_data(path, envelope)
    }

    /// Make a POST request without a body whose `data` is optional
    pub async fn post_ack<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ConsoleError> {
        let envelope: ApiEnvelope<T> = self
            .execute(Method::POST, path, self.request(Method::POST, path))
            .await?;
        Ok(envelope.data)
    }

    /// Make a PUT request; only the envelope's success flag matters
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ConsoleError> {
        let request = self.request(Method::PUT, path).json(body);
        let _: ApiEnvelope<serde_json::Value> = self.execute(Method::PUT, path, request).await?;
        Ok(())
    }

    /// Make a PATCH request
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<T>, ConsoleError> {
        let mut request = self.request(Method::PATCH, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        let envelope: ApiEnvelope<T> = self.execute(Method::PATCH, path, request).await?;
        Ok(envelope.data)
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), ConsoleError> {
        let _: ApiEnvelope<serde_json::Value> = self
            .execute(Method::DELETE, path, self.request(Method::DELETE, path))
            .await?;
        Ok(())
    }

    /// Send a multipart form (POST or PUT)
    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: multipart::Form,
    ) -> Result<Option<T>, ConsoleError> {
        let request = self.request(method.clone(), path).multipart(form);
        let envelope: ApiEnvelope<T> = self.execute(method, path, request).await?;
        Ok(envelope.data)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<ApiEnvelope<T>, ConsoleError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(failure(method, path, status, &body));
        }

        let envelope: ApiEnvelope<T> = decode(path, &body)?;
        if !envelope.success {
            let message = envelope
                .failure_text()
                .unwrap_or("Request was not successful")
                .to_string();
            warn!("HTTP {} {} reported failure: {}", method, path, message);
            return Err(ConsoleError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(envelope)
    }
}

fn failure(method: Method, path: &str, status: StatusCode, body: &str) -> ConsoleError {
    warn!("HTTP {} {} failed: {} - {}", method, path, status, body);
    let parsed: ErrorResponse = serde_json::from_str(body).unwrap_or_default();
    ConsoleError::from_status(status, parsed.text())
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ConsoleError> {
    serde_json::from_str(body)
        .map_err(|e| ConsoleError::DecodeError(format!("unexpected response from {}: {}", path, e)))
}

fn require_data<T>(path: &str, envelope: ApiEnvelope<T>) -> Result<T, ConsoleError> {
    envelope
        .data
        .ok_or_else(|| ConsoleError::DecodeError(format!("response from {} carried no data", path)))
}
