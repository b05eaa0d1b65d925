//! Authenticated HTTP access to the backend.
//!
//! Every protected call goes through [`AuthClient::auth_fetch`], which reads the
//! token from the store at call time and refuses to send anything without it.

use crate::auth::token_store::TokenStore;
use crate::error::ApiError;

use std::sync::Arc;

use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

#[derive(Clone)]
pub struct AuthClient {
    base_url: Url,
    http: Client,
    store: Arc<dyn TokenStore>,
}

impl AuthClient {
    pub(crate) fn new(base_url: Url, http: Client, store: Arc<dyn TokenStore>) -> Self {
        Self {
            base_url,
            http,
            store,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path relative to the backend base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Resolve `prefix` and append `segments`, each percent-encoded as a single
    /// path segment (`/` inside a segment becomes `%2F`).
    pub fn endpoint_with_segments<'a>(
        &self,
        prefix: &str,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint(prefix)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::validation(format!("'{prefix}' cannot carry path segments")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request. Nothing is sent until [`auth_fetch`](Self::auth_fetch).
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Send `request` with `Authorization: Bearer <token>` attached.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingToken`] if no token is stored; no request is issued.
    /// - [`ApiError::Http`] on transport failure.
    ///
    /// Non-success statuses are returned as a normal [`Response`]; 401 is not
    /// handled here.
    pub async fn auth_fetch(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let Some(token) = self.store.load()? else {
            return Err(ApiError::missing_token());
        };

        let response = request.bearer_auth(token.as_str()).send().await?;
        debug!("{} {}", response.status().as_u16(), response.url());

        Ok(response)
    }

    /// GET `url` and decode a JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.auth_fetch(self.http.get(url)).await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Send a JSON body with `method` and decode a JSON response.
    pub async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .auth_fetch(self.http.request(method, url).json(body))
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Send a JSON body with `method`, ignoring any response body.
    pub async fn send<B>(&self, method: Method, url: Url, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .auth_fetch(self.http.request(method, url).json(body))
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// DELETE `url`, ignoring any response body.
    pub async fn delete(&self, url: Url) -> Result<(), ApiError> {
        let response = self.auth_fetch(self.http.delete(url)).await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into [`ApiError::Status`] carrying the body text.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status.as_u16(), body))
}
