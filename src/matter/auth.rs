use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    MatterError, Res,
    config::{CredentialStore, Endpoints, NETRC_MACHINE},
    info,
    matter::fetch::{FetchRequest, JsonFetcher},
    success,
    types::{LoginRequest, LoginResponse},
};

/// An authenticated extraction session.
///
/// Holds the bearer token obtained at login for the rest of the run. Every
/// extractor borrows the session; the token is never refreshed or replaced.
#[derive(Debug)]
pub struct Session<F> {
    fetcher: F,
    token: String,
    endpoints: Endpoints,
}

impl<F: JsonFetcher> Session<F> {
    /// Logs in with the stored account and returns a ready session.
    ///
    /// # Authentication Flow
    ///
    /// 1. Read `(email, password)` for the `matter.online` machine. Without an
    ///    account the call fails with [`MatterError::LoginRequired`] and no
    ///    request is made.
    /// 2. POST `{"email", "password"}` as JSON to `authentication/login`.
    /// 3. Keep the `jwtToken` field of the answer as bearer token.
    ///
    /// # Errors
    ///
    /// Any failure of step 2 or 3 (rejected credentials, unreadable answer,
    /// missing or empty token) is reported as [`MatterError::AuthFailed`].
    pub async fn login<C: CredentialStore + ?Sized>(
        fetcher: F,
        credentials: &C,
        endpoints: Endpoints,
    ) -> Res<Self> {
        let Some(account) = credentials.credentials(NETRC_MACHINE) else {
            return Err(MatterError::LoginRequired);
        };

        info!("Logging in as {}", account.email);

        let body = serde_json::to_value(LoginRequest {
            email: &account.email,
            password: &account.password,
        })
        .map_err(|e| MatterError::AuthFailed(e.to_string()))?;

        let url = format!("{}authentication/login", endpoints.api_base);
        let response = fetcher
            .fetch_json(&FetchRequest::post_json(url, body))
            .await
            .map_err(|e| MatterError::AuthFailed(e.to_string()))?;

        let login: LoginResponse = serde_json::from_value(response)
            .map_err(|e| MatterError::AuthFailed(format!("unexpected login response: {}", e)))?;

        let token = login
            .jwt_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MatterError::AuthFailed("no jwtToken in login response".to_string()))?;

        success!("Logged in as {}", account.email);

        Ok(Self::with_token(fetcher, token, endpoints))
    }

    /// Builds a session around a token obtained elsewhere.
    pub fn with_token(fetcher: F, token: impl Into<String>, endpoints: Endpoints) -> Self {
        Self {
            fetcher,
            token: token.into(),
            endpoints,
        }
    }

    /// GETs `path` (relative to the API base) with the bearer token and decodes
    /// the answer as `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Res<T> {
        let url = self.api_url(path);
        let request = FetchRequest::get(url.as_str()).bearer(&self.token);
        let value: Value = self.fetcher.fetch_json(&request).await?;
        serde_json::from_value(value).map_err(|source| MatterError::MalformedResponse { url, source })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.api_base, path)
    }

    pub fn app_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.app_base, path)
    }
}
