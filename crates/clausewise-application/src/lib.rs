//! Use-case services wiring the clause store, session engine and
//! collaborators into the operations the engine exposes: ingest a document,
//! classify clause risk, negotiate a clause, answer free-form questions in
//! a durable session, and surface missing clauses.

pub mod chat_service;
pub mod ghost_service;
pub mod ingestion_service;
pub mod negotiation_service;
mod prompts;
pub mod risk_service;

pub use chat_service::ChatService;
pub use ghost_service::{GhostClause, GhostClauseService};
pub use ingestion_service::{IngestStatus, IngestionService};
pub use negotiation_service::NegotiationService;
pub use risk_service::{ClauseAnalysis, RiskAnalysisService};
