//! Candidate persistence — one record per unique email, plus the tech stack,
//! technical assessment, and conversation history keyed to that candidate.
//!
//! `AppState` holds an `Arc<dyn CandidateStore>`, so tests substitute an
//! in-memory stub without touching the engine.

pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::assistant::session::CandidateInfo;
use crate::models::candidate::CandidateRow;

pub use postgres::PgCandidateStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("incomplete candidate record: missing {0}")]
    Incomplete(&'static str),
}

/// The five persistence operations the conversation engine consumes.
///
/// Records are created once and never updated by this system.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Inserts the candidate record and returns the assigned id.
    /// Rejects an incomplete `CandidateInfo`.
    async fn save_candidate(&self, info: &CandidateInfo) -> Result<Uuid, StoreError>;

    /// Inserts one row per technology, verbatim — empty and duplicate
    /// tokens included.
    async fn save_tech_stack(
        &self,
        candidate_id: Uuid,
        tech_stack: &[String],
    ) -> Result<(), StoreError>;

    /// Pairs questions and answers element-wise by position. On a length
    /// mismatch the paired prefix is saved and a warning is logged.
    async fn save_assessment(
        &self,
        candidate_id: Uuid,
        questions: &[String],
        answers: &[String],
    ) -> Result<(), StoreError>;

    /// Appends one conversation-history row. `role` is a short tag
    /// distinguishing user/assistant turns.
    async fn save_conversation(
        &self,
        candidate_id: Uuid,
        role: &str,
        message: &str,
    ) -> Result<(), StoreError>;

    /// Looks up a candidate by email for duplicate-interview detection.
    async fn get_candidate_by_email(&self, email: &str)
        -> Result<Option<CandidateRow>, StoreError>;
}
