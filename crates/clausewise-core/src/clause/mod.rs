//! Clause domain module.
//!
//! Owns clause identity and ordering within a document, the risk rating
//! vocabulary, the segmentation policy applied at ingestion, and the
//! repository interface for durable clause storage.

mod model;
mod repository;

pub use model::{Clause, RiskRating, segment_clauses};
pub use repository::ClauseRepository;
