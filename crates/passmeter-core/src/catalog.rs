// ── Tool catalog ──
//
// The landing screen lists the security tools the service offers. When
// the service can't be asked, a fixed local catalog is shown instead.

use serde::Serialize;
use tracing::{debug, warn};

use passmeter_api::{ScoringClient, Tool};

/// Where a [`Catalog`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub tools: Vec<Tool>,
    pub source: CatalogSource,
}

impl Catalog {
    /// The password validator entry, if the catalog lists it as available.
    pub fn validator(&self) -> Option<&Tool> {
        self.tools
            .iter()
            .find(|t| t.available && t.id == PASSWORD_VALIDATOR_ID)
    }
}

/// Catalog id of the password validator tool.
pub const PASSWORD_VALIDATOR_ID: &str = "password-validator";

/// Built-in catalog used when `GET /tools` fails.
pub fn fallback_catalog() -> Vec<Tool> {
    vec![
        Tool {
            id: PASSWORD_VALIDATOR_ID.into(),
            name: "Password Validator".into(),
            description: "Check whether a password holds up against modern guidance \
                          (NIST/OWASP)."
                .into(),
            icon: "🔐".into(),
            route: "/password".into(),
            available: true,
        },
        Tool {
            id: "hash-checker".into(),
            name: "Hash Checker".into(),
            description: "Detect file tampering by comparing hashes.".into(),
            icon: "🔍".into(),
            route: "/hash".into(),
            available: false,
        },
        Tool {
            id: "phishing-detector".into(),
            name: "Phishing Detector".into(),
            description: "Inspect suspicious URLs for phishing attempts.".into(),
            icon: "🎣".into(),
            route: "/phishing".into(),
            available: false,
        },
    ]
}

/// Fetch the remote catalog, falling back to [`fallback_catalog`] on any
/// error. Never fails.
pub async fn load_catalog(client: &ScoringClient) -> Catalog {
    match client.tools().await {
        Ok(tools) => {
            debug!(count = tools.len(), "tool catalog loaded");
            Catalog {
                tools,
                source: CatalogSource::Remote,
            }
        }
        Err(err) => {
            warn!(error = %err, "tool catalog unavailable, using built-in list");
            Catalog {
                tools: fallback_catalog(),
                source: CatalogSource::Fallback,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use passmeter_api::TransportConfig;

    use super::*;

    async fn client_for(server: &MockServer) -> ScoringClient {
        let origin = Url::parse(&server.uri()).unwrap();
        ScoringClient::new(Some(&origin), &TransportConfig::default()).unwrap()
    }

    #[test]
    fn fallback_lists_only_the_validator_as_available() {
        let tools = fallback_catalog();
        assert_eq!(tools.len(), 3);
        let available: Vec<_> = tools.iter().filter(|t| t.available).collect();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, PASSWORD_VALIDATOR_ID);
    }

    #[tokio::test]
    async fn remote_catalog_is_used_when_reachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tools"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "password-validator", "name": "Validator", "available": true}
            ])))
            .mount(&server)
            .await;

        let catalog = load_catalog(&client_for(&server).await).await;
        assert_eq!(catalog.source, CatalogSource::Remote);
        assert_eq!(catalog.tools.len(), 1);
        assert!(catalog.validator().is_some());
    }

    #[tokio::test]
    async fn server_error_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tools"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let catalog = load_catalog(&client_for(&server).await).await;
        assert_eq!(catalog.source, CatalogSource::Fallback);
        assert_eq!(catalog.tools, fallback_catalog());
    }
}
