//! Client for the explorer backend.
//!
//! The backend exposes GET endpoints over a concept embedding space:
//!
//! - **bert query**: concepts most similar to a query concept
//! - **free variable search**: `concept + X - Y = Z` searches with a
//!   similarity threshold and optional GPT explanations
//!
//! Search results can be exported as CSV for download.

pub mod client;
pub mod error;
pub mod export;
pub mod types;

pub use client::{BackendEndpoints, ExplorerClient};
pub use error::ApiError;
pub use export::{RESULTS_FILE_NAME, results_csv, results_data_url};
pub use types::{ConceptMatch, FreeVarQuery, FreeVarRow, THRESHOLD_CHOICES};
