// Storefront API HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, JSON decoding,
// and status-code mapping. Endpoint modules (products, categories,
// dashboard) are implemented as inherent methods via separate files to
// keep this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the storefront REST API.
///
/// The backend returns bare JSON bodies (no envelope): entities on
/// success, an empty or plain-text body on failure. All methods map
/// non-2xx statuses to [`Error::Api`] / [`Error::NotFound`] before the
/// caller sees anything.
pub struct StoreClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StoreClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://localhost:8080`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a POST request with JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a PUT request with JSON body and decode the JSON response.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);
        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a DELETE request. The backend answers with an empty body,
    /// so only the status is inspected.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check_status(resp).await.map(|_| ())
    }

    /// Map the response status, returning the response for body reads.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                path: resp.url().path().to_owned(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: body[..body.len().min(200)].to_owned(),
            });
        }

        Ok(resp)
    }

    /// Check the status, then decode the JSON body into `T`.
    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}
