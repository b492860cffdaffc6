// Scoring service HTTP client
//
// Wraps `reqwest::Client` with base-URL handling, JSON bodies, and status
// mapping. The client is stateless per call: construct it once and share
// it behind an `Arc`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{PasswordAnalysis, PasswordRequest, PasswordStats, Tool};
use crate::transport::TransportConfig;

/// Origin used when no base-URL override is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

/// Path prefix every service route lives under.
pub const API_PREFIX: &str = "/api";

/// Raw HTTP client for the password scoring service.
///
/// `analyze` and `capture` share one response shape; they differ only in
/// whether the service persists the analyzed password.
#[derive(Debug, Clone)]
pub struct ScoringClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ScoringClient {
    /// Create a client for the given origin (or [`DEFAULT_ORIGIN`]).
    ///
    /// The [`API_PREFIX`] is appended to the origin, so
    /// `https://scoring.example.com` becomes `https://scoring.example.com/api`.
    pub fn new(origin: Option<&Url>, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = api_base(origin)?;
        debug!(base_url = %base_url, "scoring client configured");
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` and an explicit
    /// API base (already including any path prefix).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API base every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Score a password without persisting it.
    ///
    /// `POST {base}/password/analyze`
    pub async fn analyze(&self, password: &str) -> Result<PasswordAnalysis, Error> {
        let url = self.endpoint("password/analyze")?;
        debug!(len = password.chars().count(), "analyzing password");
        self.post(url, &PasswordRequest { password }).await
    }

    /// Score a password and have the service persist the record.
    ///
    /// `POST {base}/password/validate`
    pub async fn capture(&self, password: &str) -> Result<PasswordAnalysis, Error> {
        let url = self.endpoint("password/validate")?;
        debug!(len = password.chars().count(), "capturing password");
        self.post(url, &PasswordRequest { password }).await
    }

    /// Aggregate statistics over captured passwords.
    ///
    /// `GET {base}/password/stats`
    pub async fn stats(&self) -> Result<PasswordStats, Error> {
        let url = self.endpoint("password/stats")?;
        self.get(url).await
    }

    /// The tool catalog.
    ///
    /// `GET {base}/tools`
    pub async fn tools(&self) -> Result<Vec<Tool>, Error> {
        let url = self.endpoint("tools")?;
        self.get(url).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Build `{base}/{path}` without letting `Url::join` drop the base path.
    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        parse_response(resp).await
    }
}

/// Resolve the API base from an optional origin override.
fn api_base(origin: Option<&Url>) -> Result<Url, Error> {
    let origin = origin.map_or(DEFAULT_ORIGIN, Url::as_str);
    let origin = origin.trim_end_matches('/');
    Ok(Url::parse(&format!("{origin}{API_PREFIX}"))?)
}

/// Map non-2xx replies to [`Error::Http`] and decode the body otherwise.
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let preview: String = body.chars().take(200).collect();
        return Err(Error::Http {
            status: status.as_u16(),
            message: if preview.is_empty() {
                status.canonical_reason().unwrap_or("request failed").into()
            } else {
                preview
            },
        });
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}
