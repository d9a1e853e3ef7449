//! Request and response types for the explorer backend.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Similarity thresholds offered for free variable searches.
pub const THRESHOLD_CHOICES: [f64; 11] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// A concept similar to the query, as returned by the bert query endpoint.
///
/// The backend encodes each match as a `[concept, score]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct ConceptMatch {
    /// Concept identifier, e.g. `Gene_1017`.
    pub concept: String,
    /// Similarity to the query concept.
    pub score: f64,
}

impl From<(String, f64)> for ConceptMatch {
    fn from((concept, score): (String, f64)) -> Self {
        Self { concept, score }
    }
}

impl From<ConceptMatch> for (String, f64) {
    fn from(m: ConceptMatch) -> Self {
        (m.concept, m.score)
    }
}

impl ConceptMatch {
    /// Formats the match as a selectable option label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}| Similarity: {}", self.concept, self.score)
    }

    /// Recovers the concept from an option label produced by [`ConceptMatch::label`].
    ///
    /// Returns `None` when the label has no concept before the separator.
    #[must_use]
    pub fn parse_selection(label: &str) -> Option<&str> {
        let concept = label.split('|').next()?.trim();
        (!concept.is_empty()).then_some(concept)
    }
}

/// Parameters for a `concept + X - Y = Z` free variable search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeVarQuery {
    /// The anchor concept.
    pub concept: String,
    /// Number of samples the backend draws.
    pub samples: u32,
    /// Minimum similarity for a result to be kept.
    pub sim_threshold: f64,
    /// Whether the backend should ask GPT-4 to explain results.
    pub use_gpt: bool,
}

impl FreeVarQuery {
    /// Samples drawn per search.
    pub const DEFAULT_SAMPLES: u32 = 100;

    /// Creates a search with the default sample count, threshold 0 and no GPT.
    #[must_use]
    pub fn new(concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            samples: Self::DEFAULT_SAMPLES,
            sim_threshold: 0.0,
            use_gpt: false,
        }
    }

    /// Sets the similarity threshold.
    #[must_use]
    pub fn with_threshold(mut self, sim_threshold: f64) -> Self {
        self.sim_threshold = sim_threshold;
        self
    }

    /// Enables or disables GPT explanations.
    #[must_use]
    pub fn with_gpt(mut self, use_gpt: bool) -> Self {
        self.use_gpt = use_gpt;
        self
    }

    /// Model name sent to the backend.
    #[must_use]
    pub fn gpt_model(&self) -> &'static str {
        if self.use_gpt { "gpt-4" } else { "none" }
    }

    /// Checks the concept and threshold.
    ///
    /// # Errors
    ///
    /// Returns `EmptyQuery` or `InvalidThreshold`.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.concept.trim().is_empty() {
            return Err(ApiError::EmptyQuery);
        }
        if !(0.0..=1.0).contains(&self.sim_threshold) {
            return Err(ApiError::InvalidThreshold {
                threshold: self.sim_threshold,
            });
        }
        Ok(())
    }

    pub(crate) fn query_params(&self) -> [(&'static str, String); 4] {
        [
            ("query", self.concept.trim().to_string()),
            ("n", self.samples.to_string()),
            ("sim_threshold", self.sim_threshold.to_string()),
            ("use_gpt", self.gpt_model().to_string()),
        ]
    }
}

/// One row of a free variable search result.
///
/// The backend returns records whose columns depend on the search, so rows
/// keep the raw JSON object in the backend's column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FreeVarRow(pub Map<String, Value>);

impl FreeVarRow {
    /// Column names in the order the backend sent them.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Display text for a column, empty when missing.
    #[must_use]
    pub fn cell(&self, column: &str) -> String {
        match self.0.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concept_match_decodes_pairs() {
        let matches: Vec<ConceptMatch> =
            serde_json::from_str(r#"[["Gene_1017", 0.93], ["Disease_MESH_D003920", 0.5]]"#)
                .expect("valid pairs");
        assert_eq!(matches[0].concept, "Gene_1017");
        assert_eq!(matches[1].score, 0.5);
    }

    #[test]
    fn selection_label_round_trips_concept() {
        let m = ConceptMatch {
            concept: "Chemical_MESH_C000334".to_string(),
            score: 0.71,
        };
        assert_eq!(m.label(), "Chemical_MESH_C000334| Similarity: 0.71");
        assert_eq!(
            ConceptMatch::parse_selection(&m.label()),
            Some("Chemical_MESH_C000334")
        );
        assert_eq!(ConceptMatch::parse_selection("| Similarity: 1"), None);
    }

    #[test]
    fn free_var_query_defaults() {
        let query = FreeVarQuery::new("Gene_1017");
        assert_eq!(query.samples, 100);
        assert_eq!(query.gpt_model(), "none");
        assert_eq!(query.clone().with_gpt(true).gpt_model(), "gpt-4");
        assert!(query.validate().is_ok());
    }

    #[test]
    fn free_var_query_validation() {
        assert_eq!(FreeVarQuery::new("  ").validate(), Err(ApiError::EmptyQuery));
        assert!(matches!(
            FreeVarQuery::new("Gene_1017").with_threshold(1.2).validate(),
            Err(ApiError::InvalidThreshold { .. })
        ));
        for threshold in THRESHOLD_CHOICES {
            assert!(
                FreeVarQuery::new("Gene_1017")
                    .with_threshold(threshold)
                    .validate()
                    .is_ok()
            );
        }
    }

    #[test]
    fn free_var_row_cells() {
        let row: FreeVarRow = serde_json::from_str(
            r#"{"x": "Gene_2", "y": "SNP_rs1", "similarity": 0.42, "gpt": null}"#,
        )
        .expect("valid row");
        assert_eq!(row.cell("x"), "Gene_2");
        assert_eq!(row.cell("similarity"), "0.42");
        assert_eq!(row.cell("gpt"), "");
        assert_eq!(row.cell("missing"), "");
        assert_eq!(row.columns().count(), 4);
    }

    #[test]
    fn free_var_row_keeps_backend_column_order() {
        let row: FreeVarRow =
            serde_json::from_str(r#"{"y": "SNP_rs1", "x": "Gene_2", "similarity": 0.42}"#)
                .expect("valid row");
        let columns: Vec<_> = row.columns().collect();
        assert_eq!(columns, ["y", "x", "similarity"]);
    }
}
