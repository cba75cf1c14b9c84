//! STRING database client
//!
//! Issues the single outbound query of a request: the protein identifiers are
//! joined into one `identifiers` parameter and sent to the `json/network`
//! endpoint together with the organism and confidence cut-off. Interactions
//! below the cut-off are filtered by STRING itself, not here.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Public STRING API root
pub const STRING_API_URL: &str = "https://string-db.org/api";

/// NCBI taxonomy id for Homo sapiens
pub const HUMAN_SPECIES: u32 = 9606;

/// Minimum combined score (out of 1000) for "high confidence" interactions
pub const HIGH_CONFIDENCE: u32 = 900;

/// Separator STRING expects between identifiers (`%0D` once URL-encoded)
pub const IDENTIFIER_SEPARATOR: &str = "\r";

/// Errors that can occur while querying STRING
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No protein identifiers given")]
    NoIdentifiers,

    #[error("Error fetching data: {0}")]
    Status(u16),

    #[error("Request to STRING timed out")]
    Timeout,

    #[error("Request to STRING failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Malformed STRING response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(err)
        }
    }
}

/// One pairwise interaction reported by STRING
///
/// The response objects carry many more fields (string ids, per-channel
/// scores); only the two preferred names and the combined score are kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Interaction {
    #[serde(rename = "preferredName_A")]
    pub protein_a: String,
    #[serde(rename = "preferredName_B")]
    pub protein_b: String,
    pub score: f64,
}

impl Interaction {
    pub fn new(protein_a: impl Into<String>, protein_b: impl Into<String>, score: f64) -> Self {
        Self {
            protein_a: protein_a.into(),
            protein_b: protein_b.into(),
            score,
        }
    }
}

/// HTTP client bound to one STRING endpoint and query scope
#[derive(Debug, Clone)]
pub struct StringClient {
    http: reqwest::Client,
    base_url: String,
    species: u32,
    required_score: u32,
}

impl StringClient {
    /// Create a client for `base_url` (e.g. [`STRING_API_URL`])
    ///
    /// Without a timeout an unresponsive server holds the request open
    /// indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        species: u32,
        required_score: u32,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(FetchError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            species,
            required_score,
        })
    }

    /// Client for the public service: human, high confidence, no timeout
    pub fn public() -> Result<Self, FetchError> {
        Self::new(STRING_API_URL, HUMAN_SPECIES, HIGH_CONFIDENCE, None)
    }

    /// Full URL of the network endpoint
    pub fn network_url(&self) -> String {
        format!("{}/json/network", self.base_url.trim_end_matches('/'))
    }

    /// Query parameters sent for `proteins`
    pub fn query_params(&self, proteins: &[String]) -> [(&'static str, String); 3] {
        [
            ("identifiers", proteins.join(IDENTIFIER_SEPARATOR)),
            ("species", self.species.to_string()),
            ("required_score", self.required_score.to_string()),
        ]
    }

    /// Fetch all interactions among `proteins`
    ///
    /// Any status other than 200 is a terminal failure for this call.
    pub async fn fetch_interactions(
        &self,
        proteins: &[String],
    ) -> Result<Vec<Interaction>, FetchError> {
        if proteins.is_empty() {
            return Err(FetchError::NoIdentifiers);
        }

        let url = self.network_url();
        debug!(%url, count = proteins.len(), "querying STRING");

        let response = self
            .http
            .get(&url)
            .query(&self.query_params(proteins))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "STRING returned an error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let interactions: Vec<Interaction> = serde_json::from_slice(&body)?;
        debug!(interactions = interactions.len(), "STRING response decoded");

        Ok(interactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, UpstreamLog};

    use axum::{Json, Router, http::StatusCode as AxumStatus, routing::get};

    fn proteins(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"[{
            "stringId_A": "9606.ENSP00000269305",
            "stringId_B": "9606.ENSP00000418960",
            "preferredName_A": "TP53",
            "preferredName_B": "BRCA1",
            "ncbiTaxonId": 9606,
            "score": 0.999,
            "escore": 0.97
        }]"#;

        let parsed: Vec<Interaction> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, vec![Interaction::new("TP53", "BRCA1", 0.999)]);
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let json = r#"[{"preferredName_A": "TP53", "score": 950}]"#;
        assert!(serde_json::from_str::<Vec<Interaction>>(json).is_err());
    }

    #[test]
    fn test_query_params() {
        let client = StringClient::public().unwrap();
        let params = client.query_params(&proteins(&["TP53", "BRCA1", "EGFR"]));

        assert_eq!(params[0], ("identifiers", "TP53\rBRCA1\rEGFR".to_string()));
        assert_eq!(params[1], ("species", "9606".to_string()));
        assert_eq!(params[2], ("required_score", "900".to_string()));
    }

    #[test]
    fn test_network_url_trims_trailing_slash() {
        let client = StringClient::new("http://localhost:1/api/", 9606, 900, None).unwrap();
        assert_eq!(client.network_url(), "http://localhost:1/api/json/network");
    }

    #[tokio::test]
    async fn test_fetch_interactions() {
        let log = UpstreamLog::default();
        let base = test_support::spawn_upstream(test_support::string_mock(
            log.clone(),
            test_support::tp53_brca1_body(),
        ))
        .await;

        let client = StringClient::new(base, HUMAN_SPECIES, HIGH_CONFIDENCE, None).unwrap();
        let result = client
            .fetch_interactions(&proteins(&["TP53", "BRCA1", "EGFR"]))
            .await
            .unwrap();

        assert_eq!(result, vec![Interaction::new("TP53", "BRCA1", 950.0)]);

        let queries = log.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0]["identifiers"], "TP53\rBRCA1\rEGFR");
        assert_eq!(queries[0]["species"], "9606");
        assert_eq!(queries[0]["required_score"], "900");
    }

    #[tokio::test]
    async fn test_non_200_status() {
        let app = Router::new().route(
            "/json/network",
            get(|| async { AxumStatus::SERVICE_UNAVAILABLE }),
        );
        let base = test_support::spawn_upstream(app).await;

        let client = StringClient::new(base, HUMAN_SPECIES, HIGH_CONFIDENCE, None).unwrap();
        let err = client
            .fetch_interactions(&proteins(&["TP53"]))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status(503)));
        assert_eq!(err.to_string(), "Error fetching data: 503");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let app = Router::new().route(
            "/json/network",
            get(|| async { Json(serde_json::json!({"error": "not a list"})) }),
        );
        let base = test_support::spawn_upstream(app).await;

        let client = StringClient::new(base, HUMAN_SPECIES, HIGH_CONFIDENCE, None).unwrap();
        let err = client
            .fetch_interactions(&proteins(&["TP53"]))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let app = Router::new().route(
            "/json/network",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(serde_json::json!([]))
            }),
        );
        let base = test_support::spawn_upstream(app).await;

        let client = StringClient::new(
            base,
            HUMAN_SPECIES,
            HIGH_CONFIDENCE,
            Some(Duration::from_millis(200)),
        )
        .unwrap();
        let err = client
            .fetch_interactions(&proteins(&["TP53"]))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Timeout));
    }

    #[tokio::test]
    async fn test_empty_identifiers_skip_network() {
        // Nothing listens on the discard port; reaching it would fail differently.
        let client = StringClient::new("http://127.0.0.1:9", 9606, 900, None).unwrap();
        let err = client.fetch_interactions(&[]).await.unwrap_err();
        assert!(matches!(err, FetchError::NoIdentifiers));
    }
}
