//! HTTP client for the explorer backend.

use crate::error::ApiError;
use crate::types::{ConceptMatch, FreeVarQuery, FreeVarRow};
use rootcause::Report;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// URLs of the backend endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendEndpoints {
    /// Similar-concept lookup.
    #[serde(default = "default_bert_query")]
    pub bert_query: String,

    /// `concept + X - Y = Z` search.
    #[serde(default = "default_free_var_search")]
    pub free_var_search: String,
}

fn default_bert_query() -> String {
    "https://degtrdg--bioconceptvecxplorer-bert-query.modal.run/".to_string()
}

fn default_free_var_search() -> String {
    "https://degtrdg--bioconceptvecxplorer-free-var-search.modal.run".to_string()
}

impl Default for BackendEndpoints {
    fn default() -> Self {
        Self {
            bert_query: default_bert_query(),
            free_var_search: default_free_var_search(),
        }
    }
}

/// Explorer backend client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    endpoints: BackendEndpoints,
}

impl ExplorerClient {
    /// Creates a client with a fresh connection pool.
    #[must_use]
    pub fn new(endpoints: BackendEndpoints) -> Self {
        Self::with_client(reqwest::Client::new(), endpoints)
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client, endpoints: BackendEndpoints) -> Self {
        Self { http, endpoints }
    }

    /// Returns the configured endpoints.
    #[must_use]
    pub fn endpoints(&self) -> &BackendEndpoints {
        &self.endpoints
    }

    /// Looks up the `top_k` concepts most similar to `query`.
    #[instrument(skip(self))]
    pub async fn similar_concepts(
        &self,
        query: &str,
        top_k: u32,
    ) -> Result<Vec<ConceptMatch>, Report<ApiError>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::EmptyQuery.into());
        }

        let matches: Vec<ConceptMatch> = self
            .get_json(
                &self.endpoints.bert_query,
                &[("query", query.to_string()), ("top_k", top_k.to_string())],
            )
            .await?;

        debug!(count = matches.len(), "similar concepts");
        Ok(matches)
    }

    /// Runs a free variable search.
    #[instrument(skip(self), fields(concept = %search.concept))]
    pub async fn free_var_search(
        &self,
        search: &FreeVarQuery,
    ) -> Result<Vec<FreeVarRow>, Report<ApiError>> {
        search.validate()?;

        let rows: Vec<FreeVarRow> = self
            .get_json(&self.endpoints.free_var_search, &search.query_params())
            .await?;

        debug!(count = rows.len(), "free variable search results");
        Ok(rows)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, Report<ApiError>> {
        let response = self
            .http
            .get(endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| ApiError::RequestFailed {
            endpoint: endpoint.to_string(),
            details: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| {
            ApiError::UnexpectedResponse {
                endpoint: endpoint.to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
