//! Per-session conversation state. One value per session, owned by the
//! engine, never persisted itself.

use uuid::Uuid;

use crate::assistant::stage::Stage;

/// Candidate fields collected one per stage transition. A field is never
/// mutated after the stage that fills it has advanced.
#[derive(Debug, Clone, Default)]
pub struct CandidateInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Normalized to exactly 10 digits before storing.
    pub phone: Option<String>,
    /// Years, 0–50 inclusive.
    pub experience: Option<f64>,
    pub position: Option<String>,
    pub location: Option<String>,
}

/// Full engine-internal state for one conversation.
///
/// `answers` is parallel-indexed to `technical_questions`;
/// `current_question_index` never exceeds `technical_questions.len()`.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    pub stage: Stage,
    pub candidate_info: CandidateInfo,
    /// Comma-split technology names, verbatim — duplicates and empty tokens kept.
    pub tech_stack: Vec<String>,
    /// At most 3 generated questions, fixed once generated.
    pub technical_questions: Vec<String>,
    pub answers: Vec<String>,
    pub current_question_index: usize,
    /// Assigned by the store once the candidate record exists; `None` before
    /// the tech-stack stage completes.
    pub candidate_id: Option<Uuid>,
}
