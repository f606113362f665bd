//! e-Stat Japan API client and response normalization pipeline.
//!
//! The e-Stat portal exposes Japan's official statistics as deeply nested,
//! code-heavy, paginated XML. This crate fetches those documents and
//! normalizes them into compact, hierarchically grouped structures:
//! classification codes are resolved to display names through a per-table
//! catalog, value cells are grouped into a nested attribute tree, and
//! truncated responses carry an explicit continuation hint.
//!
//! # Example
//!
//! ```no_run
//! use estat::{EstatClient, EstatConfig};
//!
//! # async fn run() -> estat::Result<()> {
//! let client = EstatClient::new(EstatConfig::from_env()?)?;
//!
//! let params = vec![("surveyYears".to_string(), "202001-202012".to_string())];
//! let response = client.get_stats_list(&params).await?;
//! let rendered = estat::normalize_table_list(&response)?;
//!
//! for segment in &rendered.segments {
//!     println!("{segment:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;

pub use client::EstatClient;
pub use config::EstatConfig;
pub use error::{EstatError, Result};
pub use normalize::{
    normalize_data, normalize_metadata, normalize_survey_list, normalize_table_list,
    AttributeTree, ClassificationCatalog, NormalizedResponse, Segment,
};
