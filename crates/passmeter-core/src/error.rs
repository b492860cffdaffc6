// ── Core error types ──
//
// User-facing errors from passmeter-core. Consumers never see reqwest or
// serde failures directly; the `From<passmeter_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the scoring service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Scoring service timed out")]
    Timeout,

    // ── Service errors ───────────────────────────────────────────────
    #[error("Scoring service rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from the scoring service: {message}")]
    InvalidResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Generic text shown to the user whenever an analysis fails. The
    /// underlying cause goes to the log, not the screen.
    pub const CONNECTIVITY_MESSAGE: &'static str =
        "Could not reach the scoring service. Check that the backend is running.";
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<passmeter_api::Error> for CoreError {
    fn from(err: passmeter_api::Error) -> Self {
        match err {
            ref timed_out if timed_out.is_timeout() => CoreError::Timeout,
            passmeter_api::Error::Transport(e) => {
                let url = e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string);
                CoreError::ConnectionFailed {
                    url,
                    reason: e.to_string(),
                }
            }
            passmeter_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid service URL: {e}"),
            },
            passmeter_api::Error::Tls(message) => CoreError::Config { message },
            passmeter_api::Error::Http { status, message } => {
                CoreError::Rejected { status, message }
            }
            passmeter_api::Error::Deserialization { message, .. } => {
                CoreError::InvalidResponse { message }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use passmeter_api::{ScoringClient, TransportConfig};
    use url::Url;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn http_errors_become_rejections() {
        let err: CoreError = passmeter_api::Error::Http {
            status: 502,
            message: "bad gateway".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Rejected { status: 502, .. }));
    }

    #[test]
    fn decode_errors_become_invalid_response() {
        let err: CoreError = passmeter_api::Error::Deserialization {
            message: "expected value".into(),
            body: "<html>".into(),
        }
        .into();
        assert!(matches!(err, CoreError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn request_timeouts_become_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let origin = Url::parse(&server.uri()).unwrap();
        let transport = TransportConfig {
            timeout: Duration::from_millis(50),
            ..TransportConfig::default()
        };
        let client = ScoringClient::new(Some(&origin), &transport).unwrap();

        let err: CoreError = client.analyze("whatever").await.unwrap_err().into();
        assert!(matches!(err, CoreError::Timeout), "got: {err:?}");
    }
}
