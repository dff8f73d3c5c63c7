//! # JSON Fetch Capability
//!
//! Every request the extractors make goes through [`JsonFetcher`]: one request
//! in, one decoded JSON document out. [`HttpFetcher`] is the `reqwest`-backed
//! implementation used by the CLI; tests substitute their own fetcher that
//! serves fixtures and records the requests it saw.
//!
//! A [`FetchRequest`] carries only what the matter.online API needs: a method,
//! an absolute URL, an optional bearer token and an optional JSON body.

use std::future::Future;

use reqwest::{Client, Response};
use serde_json::Value;

use crate::{MatterError, Res};

/// HTTP method of a [`FetchRequest`].
///
/// The API only needs `GET` for reads and `POST` for the login call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A single JSON request: method, absolute URL, optional bearer token and
/// optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl FetchRequest {
    /// Builds an unauthenticated `GET` for `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            bearer: None,
            body: None,
        }
    }

    /// Builds a `POST` that sends `body` as `application/json`.
    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            bearer: None,
            body: Some(body),
        }
    }

    /// Attaches `token`, sent as `authorization: Bearer <token>`.
    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }
}

/// Performs one request and returns the decoded JSON body.
///
/// Implementations fail on non-2xx statuses and on bodies that are not JSON.
/// They must not retry.
pub trait JsonFetcher {
    fn fetch_json(&self, request: &FetchRequest) -> impl Future<Output = Res<Value>> + Send;
}

impl<T: JsonFetcher> JsonFetcher for &T {
    fn fetch_json(&self, request: &FetchRequest) -> impl Future<Output = Res<Value>> + Send {
        (**self).fetch_json(request)
    }
}

/// [`JsonFetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client identifying itself as
    /// `matterdl/<version>`.
    ///
    /// # Errors
    ///
    /// Returns [`MatterError::Http`] if the TLS backend cannot be initialized.
    ///
    /// # Example
    ///
    /// ```
    /// let fetcher = HttpFetcher::new()?;
    /// let session = Session::login(fetcher, &EnvCredentials, Endpoints::from_env()).await?;
    /// ```
    pub fn new() -> Res<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured client, e.g. one with a proxy or timeouts.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn handle_response(url: &str, response: Response) -> Res<Value> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MatterError::from_status(url, status.as_u16(), message));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|source| MatterError::MalformedResponse {
            url: url.to_string(),
            source,
        })
    }
}

impl JsonFetcher for HttpFetcher {
    /// Sends `request` and decodes the answer.
    ///
    /// # Returns
    ///
    /// - `Ok(Value)` - the JSON body of a 2xx answer
    /// - `Err(MatterError::Status)` - any other status, with the body as message
    /// - `Err(MatterError::MalformedResponse)` - a 2xx answer that is not JSON
    /// - `Err(MatterError::Http)` - connection or transport failure
    async fn fetch_json(&self, request: &FetchRequest) -> Res<Value> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Self::handle_response(&request.url, response).await
    }
}
