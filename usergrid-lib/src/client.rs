//! HTTP client for the users list endpoint

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::api::UserPage;
use crate::api::UserSource;
use crate::api::parse_list_payload;
use crate::api::query::ListQuery;
use crate::error::ApiError;

/// Client for a paginated users list endpoint.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks.
///
/// # Example
///
/// ```ignore
/// use usergrid_lib::UsersClient;
/// use usergrid_lib::api::query::ListQuery;
///
/// let client = UsersClient::builder()
///     .url("https://dummyjson.com")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let page = client.list(&ListQuery::page(10, 0)).await?;
/// ```
#[derive(Clone)]
pub struct UsersClient {
    inner: Arc<UsersClientInner>,
}

struct UsersClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl UsersClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> UsersClientBuilder<Missing> {
        UsersClientBuilder::new()
    }

    /// Returns the base URL of the endpoint.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Executes a list query.
    ///
    /// Any non-2xx status is an error; the body is never read as a partial result.
    pub async fn list(&self, query: &ListQuery) -> Result<UserPage, ApiError> {
        let url = query.build_url(&self.inner.base_url)?;
        log::debug!("GET {}", url);

        let mut request = self
            .inner
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(ApiError::http(status.as_u16(), message));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        parse_list_payload(&body)
    }

    fn classify(&self, err: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::from(err),
        }
    }
}

#[async_trait]
impl UserSource for UsersClient {
    async fn list_users(&self, query: &ListQuery) -> Result<UserPage, ApiError> {
        self.list(query).await
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`UsersClient`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = UsersClient::builder()
///     .url("https://dummyjson.com")
///     .timeout(Duration::from_secs(30))
///     .connect_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub struct UsersClientBuilder<U> {
    url: U,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl UsersClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the endpoint base URL, e.g. `https://dummyjson.com`.
    pub fn url(self, url: impl Into<String>) -> UsersClientBuilder<Set<String>> {
        UsersClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for UsersClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> UsersClientBuilder<U> {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl UsersClientBuilder<Set<String>> {
    /// Builds the [`UsersClient`].
    ///
    /// Fails if the URL does not parse or the HTTP client cannot be created.
    pub fn build(self) -> Result<UsersClient, ApiError> {
        let base_url = Url::parse(&self.url.0)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::Network)?
            }
        };

        Ok(UsersClient {
            inner: Arc::new(UsersClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_valid_url() {
        let err = UsersClient::builder().url("not a url").build().err();
        assert!(matches!(err, Some(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_base_url() {
        let client = UsersClient::builder()
            .url("https://dummyjson.com")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://dummyjson.com/");
    }
}
