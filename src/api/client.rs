// book-form - Book catalog form client
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! HTTP client for the Book API
//!
//! This module wraps `reqwest::Client` with:
//! - Base URL management (defaults to a local development server)
//! - JSON request/response handling for every book endpoint
//! - Conversion of error responses into `BookFormError::Api`, using the server's
//!   `message` field when present and a per-operation default otherwise
//!
//! # Endpoints
//! | Method         | Path              | Body          | Returns     |
//! |----------------|-------------------|---------------|-------------|
//! | `GET`          | `/api/books`      |               | `[Book]`    |
//! | `POST`         | `/api/books`      | `BookRequest` | `Book`      |
//! | `GET`          | `/api/books/{id}` |               | `Book`      |
//! | `PATCH`/`PUT`  | `/api/books/{id}` | `BookPatch`   | `Book`      |
//! | `DELETE`       | `/api/books/{id}` |               | no content  |
//!
//! Requests are never retried. A failed call is reported once and the user decides
//! whether to try again.

use crate::diff::UpdateMethod;
use crate::error::{BookFormError, Result};
use crate::model::{Book, BookPatch, BookRequest, ErrorBody};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Server used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "BOOK_API_BASE_URL";

/// Collection path; single books live at `{BOOKS_PATH}/{id}`
pub const BOOKS_PATH: &str = "/api/books";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const LOAD_FAILED: &str = "Failed to load books.";
const CREATE_FAILED: &str = "Failed to create book.";
const UPDATE_FAILED: &str = "Failed to update book.";
const DELETE_FAILED: &str = "Failed to delete book.";
const NOT_FOUND: &str = "Book not found.";

/// Configuration for BookApiClient
/// Provides a builder pattern for client customization
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("book-form/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Default configuration with the base URL taken from `BOOK_API_BASE_URL` if set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url.trim().to_string();
            }
        }
        config
    }

    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(BookFormError::InvalidConfiguration(format!(
                "unsupported base URL scheme '{}'",
                other
            ))),
        }
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// HTTP client for the Book API
///
/// # Example
/// ```rust,no_run
/// use book_form::api::{BookApiClient, ClientConfig};
///
/// # async fn example() -> book_form::error::Result<()> {
/// let config = ClientConfig::builder()
///     .base_url("http://localhost:8080")
///     .build();
/// let client = BookApiClient::with_config(config)?;
///
/// for book in client.list_books().await? {
///     println!("{} by {}", book.title, book.author);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BookApiClient {
    /// Underlying HTTP client
    client: Client,
    /// Base URL without trailing slash (e.g., http://localhost:8080)
    base_url: String,
}

impl BookApiClient {
    /// Create a client for the default local server
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                BookFormError::InvalidConfiguration(format!("Invalid user agent: {}", e))
            })?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/books`
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        let request = self.request(Method::GET, BOOKS_PATH, None::<&()>);
        let response = self.send(request, LOAD_FAILED).await?;
        self.handle_success_response(response).await
    }

    /// `POST /api/books`
    pub async fn create_book(&self, book: &BookRequest) -> Result<Book> {
        let request = self.request(Method::POST, BOOKS_PATH, Some(book));
        let response = self.send(request, CREATE_FAILED).await?;
        self.handle_success_response(response).await
    }

    /// `GET /api/books/{id}`
    pub async fn get_book(&self, id: i64) -> Result<Book> {
        let request = self.request(Method::GET, &book_path(id), None::<&()>);
        let response = self.send(request, NOT_FOUND).await?;
        self.handle_success_response(response).await
    }

    /// `PATCH /api/books/{id}` or `PUT /api/books/{id}` with the changed fields
    pub async fn update_book(
        &self,
        id: i64,
        method: UpdateMethod,
        patch: &BookPatch,
    ) -> Result<Book> {
        let request = self.request(method.as_method(), &book_path(id), Some(patch));
        let response = self.send(request, UPDATE_FAILED).await?;
        self.handle_success_response(response).await
    }

    /// `DELETE /api/books/{id}`
    pub async fn delete_book(&self, id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, &book_path(id), None::<&()>);
        self.send(request, DELETE_FAILED).await?;
        Ok(())
    }

    fn request<B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, %url, "sending request");

        let mut builder = self.client.request(method, &url);
        if let Some(b) = body {
            builder = builder.json(b);
        }
        builder
    }

    /// Send a request and turn anything but 2xx into an error
    ///
    /// `default_message` is used when the error body has no `message`.
    async fn send(&self, request: RequestBuilder, default_message: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "request failed before a response arrived");
            BookFormError::network(&e)
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        Err(self.handle_error_response(response, default_message).await)
    }

    /// Handle successful HTTP response
    async fn handle_success_response<T>(&self, response: Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| BookFormError::network(&e))?;

        serde_json::from_str::<T>(&response_text).map_err(|e| {
            BookFormError::InvalidApiResponse {
                message: format!("Parse error: {} at line {} col {}", e, e.line(), e.column()),
                response_body: Some(response_text.chars().take(800).collect()),
            }
        })
    }

    /// Handle error HTTP response
    async fn handle_error_response(&self, response: Response, default_message: &str) -> BookFormError {
        let status = response.status();
        let url = response.url().clone();
        let error_body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&error_body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| default_message.to_string());

        warn!(status = status.as_u16(), endpoint = url.path(), %message, "API request failed");

        BookFormError::api(message, status.as_u16())
    }
}

fn book_path(id: i64) -> String {
    format!("{}/{}", BOOKS_PATH, id)
}

// ===== TESTS =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DetailPatch;
    use mockito::Matcher;
    use serde_json::json;

    const BOOK_JSON: &str = r#"{
        "id": 1,
        "title": "Clean Code",
        "author": "Robert C. Martin",
        "isbn": "9780132350884",
        "price": 33000,
        "publishDate": "2008-08-01",
        "detail": {
            "description": "A handbook of agile software craftsmanship",
            "language": "English",
            "pageCount": 464,
            "publisher": "Prentice Hall",
            "coverImageUrl": "https://example.com/clean-code.jpg",
            "edition": "1st"
        }
    }"#;

    fn client_for(server: &mockito::ServerGuard) -> BookApiClient {
        let config = ClientConfig::builder().base_url(server.url()).build();
        BookApiClient::with_config(config).unwrap()
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::builder()
            .base_url("https://books.example.com/")
            .timeout(Duration::from_secs(5))
            .user_agent("TestAgent/1.0")
            .build();

        assert_eq!(config.base_url, "https://books.example.com/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "TestAgent/1.0");

        let client = BookApiClient::with_config(config).unwrap();
        assert_eq!(client.base_url(), "https://books.example.com");
    }

    #[test]
    fn test_default_config_targets_local_server() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let bad_scheme = ClientConfig::builder().base_url("ftp://example.com").build();
        assert!(matches!(
            BookApiClient::with_config(bad_scheme),
            Err(BookFormError::InvalidConfiguration(_))
        ));

        let relative = ClientConfig::builder().base_url("not a url").build();
        assert!(matches!(
            BookApiClient::with_config(relative),
            Err(BookFormError::UrlError(_))
        ));
    }

    #[tokio::test]
    async fn test_list_books() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/books")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", BOOK_JSON))
            .expect(1)
            .create_async()
            .await;

        let books = client_for(&server).list_books().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Clean Code");
        assert_eq!(books[0].price, "33000");
    }

    #[tokio::test]
    async fn test_create_sends_detail_request() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/api/books")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "title": "Clean Code",
                "detailRequest": { "edition": "1st" }
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(BOOK_JSON)
            .expect(1)
            .create_async()
            .await;

        let mut request = BookRequest::default();
        request.title = "Clean Code".to_string();
        request.detail_request.edition = "1st".to_string();

        let book = client_for(&server).create_book(&request).await.unwrap();
        assert_eq!(book.id, 1);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_uses_selected_method() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("PATCH", "/api/books/1")
            .match_body(Matcher::Json(json!({ "detailRequest": { "pageCount": "470" } })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BOOK_JSON)
            .expect(1)
            .create_async()
            .await;

        let patch = BookPatch {
            detail_request: Some(DetailPatch {
                page_count: Some("470".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        client_for(&server)
            .update_book(1, UpdateMethod::Patch, &patch)
            .await
            .unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_message_from_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("PUT", "/api/books/1")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"ISBN already registered"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .update_book(1, UpdateMethod::Put, &BookPatch::default())
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(err.to_string(), "ISBN already registered");
        assert_eq!(err.user_message(), "ISBN already registered (error code: 409)");
    }

    #[tokio::test]
    async fn test_error_without_message_uses_default() {
        let mut server = mockito::Server::new_async().await;
        let _get = server
            .mock("GET", "/api/books/99")
            .with_status(404)
            .with_body("{}")
            .create_async()
            .await;
        let _delete = server
            .mock("DELETE", "/api/books/99")
            .with_status(500)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = client_for(&server);

        let err = client.get_book(99).await.unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "Book not found.");

        let err = client.delete_book(99).await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.to_string(), "Failed to delete book.");
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("DELETE", "/api/books/5")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        client_for(&server).delete_book(5).await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_unparsable_success_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/books")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client_for(&server).list_books().await.unwrap_err();
        assert!(matches!(err, BookFormError::InvalidApiResponse { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is closed on test machines.
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:9")
            .timeout(Duration::from_secs(2))
            .build();
        let client = BookApiClient::with_config(config).unwrap();

        let err = client.list_books().await.unwrap_err();
        assert!(matches!(err, BookFormError::Network { .. }));
    }
}
