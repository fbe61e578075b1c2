//! End-to-end flows over the real directory-backed stores.

use async_trait::async_trait;
use clausewise_application::{ChatService, IngestStatus, IngestionService, NegotiationService};
use clausewise_core::clause::{ClauseRepository, RiskRating};
use clausewise_core::collaborator::TextGenerator;
use clausewise_core::error::Result;
use clausewise_core::negotiation::NextAction;
use clausewise_core::session::{SessionRef, SessionRepository, TurnRole};
use clausewise_infrastructure::{DirClauseRepository, PlainTextExtractor, TomlSessionRepository};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Returns prose with no JSON in it, whatever the prompt.
struct MalformedGenerator;

#[async_trait]
impl TextGenerator for MalformedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok("Certainly! Here are my thoughts, in plain prose only.".to_string())
    }
}

/// Answers with a running counter so every response is distinct.
struct CountingGenerator {
    calls: Mutex<usize>,
}

impl CountingGenerator {
    fn new() -> Self {
        Self {
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for CountingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        Ok(format!("answer {}", calls))
    }
}

async fn ingest_sample(temp_dir: &TempDir, uid: &str) -> Arc<DirClauseRepository> {
    let clause_repo = Arc::new(DirClauseRepository::new(temp_dir.path()).await.unwrap());
    let ingestion = IngestionService::new(Arc::new(PlainTextExtractor), clause_repo.clone());

    let status = ingestion
        .ingest(uid, b"Clause A text\n\nClause B text\n", "lease.txt")
        .await
        .unwrap();
    assert_eq!(status, IngestStatus::Completed { clause_count: 2 });

    clause_repo
}

#[tokio::test]
async fn test_ingest_then_negotiate_with_malformed_upstream() {
    let temp_dir = TempDir::new().unwrap();
    let clause_repo = ingest_sample(&temp_dir, "doc-1").await;

    // Segmentation: two clauses, blank line is a separator only.
    assert_eq!(
        clause_repo.get_clause("doc-1", 0).await.unwrap(),
        "Clause A text"
    );
    assert_eq!(
        clause_repo.get_clause("doc-1", 1).await.unwrap(),
        "Clause B text"
    );

    let negotiation =
        NegotiationService::new(Arc::new(MalformedGenerator), clause_repo.clone());
    let clause = clause_repo.get_clause("doc-1", 0).await.unwrap();
    let result = negotiation
        .negotiate(&clause, RiskRating::Yellow, "friendly")
        .await
        .unwrap();

    // A failed negotiation never claims improvement.
    assert_eq!(result.risk_after, RiskRating::Yellow);
    assert_eq!(
        result.next_actions,
        vec![
            NextAction::Accept,
            NextAction::Counter,
            NextAction::AskHumanLawyer
        ]
    );

    // The caller decides whether to persist; applying the outcome writes
    // only the risk annotation, never the text.
    negotiation
        .apply_outcome("doc-1", 0, &result)
        .await
        .unwrap();
    let clauses = clause_repo.get_clauses("doc-1").await.unwrap();
    assert_eq!(clauses[0].risk, Some(RiskRating::Yellow));
    assert_eq!(clauses[0].original_text, "Clause A text");
}

#[tokio::test]
async fn test_get_all_clauses_is_idempotent_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    ingest_sample(&temp_dir, "doc-1").await;

    let repo = DirClauseRepository::new(temp_dir.path()).await.unwrap();
    let first = repo.get_all_clauses("doc-1").await.unwrap();
    let second = repo.get_all_clauses("doc-1").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first, vec!["Clause A text", "Clause B text"]);
}

#[tokio::test]
async fn test_session_survives_process_restart() {
    let temp_dir = TempDir::new().unwrap();
    let clause_repo = ingest_sample(&temp_dir, "doc-1").await;

    let session_id = {
        let session_repo = Arc::new(TomlSessionRepository::new(temp_dir.path()).await.unwrap());
        let chat = ChatService::new(
            clause_repo.clone(),
            session_repo,
            Arc::new(CountingGenerator::new()),
        );

        let (_, session_id) = chat
            .ask("doc-1", "What does clause 1 say?", SessionRef::New)
            .await
            .unwrap();
        chat.ask(
            "doc-1",
            "And clause 2?",
            SessionRef::Resume(session_id.clone()),
        )
        .await
        .unwrap();
        session_id
    };

    // A fresh service over the same directory resumes from durable state.
    let session_repo = Arc::new(TomlSessionRepository::new(temp_dir.path()).await.unwrap());
    let chat = ChatService::new(
        clause_repo,
        session_repo,
        Arc::new(CountingGenerator::new()),
    );

    assert_eq!(chat.list_sessions().await.unwrap(), vec![session_id.clone()]);

    let turns = chat.get_session(&session_id).await.unwrap();
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[0].content, "What does clause 1 say?");
    assert_eq!(turns[2].content, "And clause 2?");

    chat.ask("doc-1", "Anything risky?", SessionRef::Resume(session_id.clone()))
        .await
        .unwrap();
    assert_eq!(chat.get_session(&session_id).await.unwrap().len(), 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_twenty_concurrent_asks_do_not_corrupt_turn_order() {
    let temp_dir = TempDir::new().unwrap();
    let clause_repo = ingest_sample(&temp_dir, "doc-1").await;
    let session_repo = Arc::new(TomlSessionRepository::new(temp_dir.path()).await.unwrap());
    let chat = Arc::new(ChatService::new(
        clause_repo,
        session_repo.clone(),
        Arc::new(CountingGenerator::new()),
    ));

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let chat = chat.clone();
            tokio::spawn(async move {
                chat.ask(
                    "doc-1",
                    &format!("question {}", i),
                    SessionRef::ResumeOrCreate("shared-session".to_string()),
                )
                .await
                .unwrap();
            })
        })
        .collect();
    for joined in futures::future::join_all(tasks).await {
        joined.unwrap();
    }

    // Exactly 20 user turns and 20 assistant turns, each question
    // immediately followed by its answer.
    let turns = chat.get_session("shared-session").await.unwrap();
    assert_eq!(turns.len(), 40);
    for pair in turns.chunks(2) {
        assert_eq!(pair[0].role, TurnRole::User);
        assert_eq!(pair[1].role, TurnRole::Assistant);
    }
    let user_turns = turns.iter().filter(|t| t.role == TurnRole::User).count();
    assert_eq!(user_turns, 20);
    for i in 0..20 {
        let question = format!("question {}", i);
        assert!(turns.iter().any(|t| t.content == question));
    }

    // The final persisted state matches: write-through kept storage
    // current after every assistant turn.
    let stored = session_repo
        .find_by_id("shared-session")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.turns.len(), 40);
}
