//! Clause repository trait.
//!
//! Defines the interface for durable clause storage. The clause store
//! exclusively owns clause identity and ordering; documents are write-once
//! and clause text is never rewritten after ingestion.

use super::model::{Clause, RiskRating};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for durable, per-document clause storage.
///
/// Implementations persist each document's ordered clause texts under its
/// opaque `uid`, with dense 0-based indices derived from sequence position.
///
/// # Write-once policy
///
/// `put_clauses` may be called once per `uid`. Calling it again with
/// identical content is a no-op (an idempotent re-ingest of the same
/// upload); calling it again with conflicting content fails with
/// `DocumentConflict`, so an already-reviewed document can never be
/// silently replaced.
#[async_trait]
pub trait ClauseRepository: Send + Sync {
    /// Persists the ordered clause texts for a new document.
    ///
    /// # Errors
    ///
    /// - `DocumentConflict` if `uid` already holds different content
    async fn put_clauses(&self, uid: &str, clauses: Vec<String>) -> Result<()>;

    /// Returns the text of one clause.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if `uid` is unknown
    /// - `ClauseNotFound` if `index` is out of range (the boundary
    ///   `index == clause_count` is out of range)
    async fn get_clause(&self, uid: &str, index: usize) -> Result<String>;

    /// Returns all clause texts in index order.
    ///
    /// A document that exists with zero clauses returns an empty vector,
    /// not an error.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if `uid` is unknown
    async fn get_all_clauses(&self, uid: &str) -> Result<Vec<String>>;

    /// Returns the full clause records (text plus risk annotation) in
    /// index order.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if `uid` is unknown
    async fn get_clauses(&self, uid: &str) -> Result<Vec<Clause>>;

    /// Updates the risk annotation of one clause. The clause text itself is
    /// immutable; this is the only mutation the store permits.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` / `ClauseNotFound` as for `get_clause`
    async fn set_clause_risk(&self, uid: &str, index: usize, risk: RiskRating) -> Result<()>;

    /// Returns whether a document exists under `uid`. Never fails.
    async fn document_exists(&self, uid: &str) -> bool;

    /// Lists the uids of all stored documents.
    async fn list_documents(&self) -> Result<Vec<String>>;
}
