//! Conversation engine — walks one candidate through the fixed intake
//! sequence, validates each answer, and triggers persistence and question
//! generation at the tech-stack boundary.
//!
//! Flow: greeting → name → email → phone → experience → position →
//!       location → tech_stack → technical question loop → done.
//!
//! Dispatch is an exhaustive `match` over `Stage`; every handler returns the
//! reply text plus an "ended" flag, and the engine commits state only after
//! the whole turn succeeds.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::assistant::questions::{generate_tech_questions, QuestionSource};
use crate::assistant::session::ConversationState;
use crate::assistant::stage::Stage;
use crate::assistant::validation::{
    clean_name, is_valid_email, normalize_phone, parse_experience, parse_tech_stack,
};
use crate::candidates::{CandidateStore, StoreError};

// ────────────────────────────────────────────────────────────────────────────
// Reply strings
// ────────────────────────────────────────────────────────────────────────────

const GREETING: &str = "Hello! I'm the TalentScout Hiring Assistant. \
    I'll help evaluate your profile for potential opportunities.";
const ASK_NAME: &str = "Could you please share your full name?";
const INVALID_EMAIL: &str = "That doesn't seem to be a valid email address. Please try again.";
const ALREADY_INTERVIEWED: &str =
    "It seems you've already interviewed with us. Our team will contact you about your application.";
const ASK_PHONE: &str = "Thank you! Now, please share your phone number.";
const INVALID_PHONE: &str = "Please enter a valid 10-digit phone number.";
const ASK_EXPERIENCE: &str =
    "Great! How many years of experience do you have in the technology industry?";
const INVALID_EXPERIENCE: &str = "Please enter a valid number of years (e.g., '5' or '2.5').";
const ASK_POSITION: &str = "What position(s) are you interested in?";
const ASK_LOCATION: &str = "What is your current location?";
const ASK_TECH_STACK: &str = "Please list your tech stack (programming languages, frameworks, \
    databases, tools). Separate each technology with a comma.";
const SAVE_FAILED: &str =
    "I apologize, but there was an error saving your information. Please try again later.";
const ASSESSMENT_COMPLETE: &str =
    "Technical assessment complete. Our team will review your responses.";
const CLOSING: &str = "Thank you for your time! Our recruitment team will review your profile \
    and contact you if there's a match. Good luck!";

// ────────────────────────────────────────────────────────────────────────────
// Turn contract + engine error
// ────────────────────────────────────────────────────────────────────────────

/// One engine response: the reply text and whether the conversation ended.
#[derive(Debug, Clone)]
pub struct Turn {
    pub reply: String,
    pub ended: bool,
}

impl Turn {
    fn next(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ended: false,
        }
    }

    fn end(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ended: true,
        }
    }
}

/// The only engine failure that propagates to the HTTP edge: the
/// duplicate-interview lookup. Every other collaborator failure is either
/// swallowed (history, assessment, question generation) or converted into
/// an apology reply that ends the session.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("candidate lookup failed: {0}")]
    Store(#[from] StoreError),
}

// ────────────────────────────────────────────────────────────────────────────
// Assistant
// ────────────────────────────────────────────────────────────────────────────

/// The conversation engine — one instance per session, no shared state.
/// Owns the session's `ConversationState`; the HTTP layer sees only
/// `greeting()` and `process_input()`.
pub struct Assistant {
    state: ConversationState,
    store: Arc<dyn CandidateStore>,
    questions: Arc<dyn QuestionSource>,
}

impl Assistant {
    pub fn new(store: Arc<dyn CandidateStore>, questions: Arc<dyn QuestionSource>) -> Self {
        Self {
            state: ConversationState::default(),
            store,
            questions,
        }
    }

    /// Opening message delivered when the session is created.
    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    /// Runs one turn: raw user text in, reply + ended flag out.
    ///
    /// Handlers work on a clone of the state; the clone is committed only
    /// after the whole turn succeeds, so a turn dropped mid-await (the
    /// 30s timeout) leaves state exactly as it was before the turn began.
    pub async fn process_input(&mut self, input: &str) -> Result<Turn, EngineError> {
        debug!("Processing input at stage '{}'", self.state.stage.as_str());

        let mut next = self.state.clone();
        let turn = dispatch(&mut next, input, self.store.as_ref(), self.questions.as_ref()).await?;
        if turn.ended {
            next.stage = Stage::Done;
        }
        self.state = next;

        debug!("Stage after turn: '{}'", self.state.stage.as_str());
        Ok(turn)
    }
}

async fn dispatch(
    state: &mut ConversationState,
    input: &str,
    store: &dyn CandidateStore,
    questions: &dyn QuestionSource,
) -> Result<Turn, EngineError> {
    let turn = match state.stage {
        Stage::Greeting => handle_greeting(state),
        Stage::Name => handle_name(state, input),
        Stage::Email => handle_email(state, input, store).await?,
        Stage::Phone => handle_phone(state, input),
        Stage::Experience => handle_experience(state, input),
        Stage::Position => handle_position(state, input),
        Stage::Location => handle_location(state, input),
        Stage::TechStack => handle_tech_stack(state, input, store, questions).await,
        Stage::TechnicalQuestions => handle_technical_answer(state, input, store).await,
        // A message after the conversation ended: repeat the closing notice,
        // touch nothing.
        Stage::Done => Turn::end(CLOSING),
    };
    Ok(turn)
}

// ────────────────────────────────────────────────────────────────────────────
// Stage handlers
// ────────────────────────────────────────────────────────────────────────────

fn handle_greeting(state: &mut ConversationState) -> Turn {
    state.stage = Stage::Name;
    Turn::next(ASK_NAME)
}

fn handle_name(state: &mut ConversationState, input: &str) -> Turn {
    let cleaned = clean_name(input);
    let reply = format!("Nice to meet you, {cleaned}! Could you please provide your email address?");
    state.candidate_info.name = Some(cleaned);
    state.stage = Stage::Email;
    Turn::next(reply)
}

async fn handle_email(
    state: &mut ConversationState,
    input: &str,
    store: &dyn CandidateStore,
) -> Result<Turn, EngineError> {
    if !is_valid_email(input) {
        return Ok(Turn::next(INVALID_EMAIL));
    }

    // The duplicate-interview check is the one store call whose failure
    // aborts the turn: without its answer the engine cannot decide whether
    // to continue.
    if store.get_candidate_by_email(input).await?.is_some() {
        return Ok(Turn::end(ALREADY_INTERVIEWED));
    }

    state.candidate_info.email = Some(input.to_string());
    state.stage = Stage::Phone;

    // History rows are keyed to a candidate record, which does not exist
    // yet at this stage — the guard inside log_history keeps this a no-op
    // until one is created.
    log_history(state, store, "user", input).await;

    Ok(Turn::next(ASK_PHONE))
}

fn handle_phone(state: &mut ConversationState, input: &str) -> Turn {
    match normalize_phone(input) {
        Some(digits) => {
            state.candidate_info.phone = Some(digits);
            state.stage = Stage::Experience;
            Turn::next(ASK_EXPERIENCE)
        }
        None => Turn::next(INVALID_PHONE),
    }
}

fn handle_experience(state: &mut ConversationState, input: &str) -> Turn {
    match parse_experience(input) {
        Some(years) => {
            state.candidate_info.experience = Some(years);
            state.stage = Stage::Position;
            Turn::next(ASK_POSITION)
        }
        None => Turn::next(INVALID_EXPERIENCE),
    }
}

fn handle_position(state: &mut ConversationState, input: &str) -> Turn {
    state.candidate_info.position = Some(input.to_string());
    state.stage = Stage::Location;
    Turn::next(ASK_LOCATION)
}

fn handle_location(state: &mut ConversationState, input: &str) -> Turn {
    state.candidate_info.location = Some(input.to_string());
    state.stage = Stage::TechStack;
    Turn::next(ASK_TECH_STACK)
}

async fn handle_tech_stack(
    state: &mut ConversationState,
    input: &str,
    store: &dyn CandidateStore,
    questions: &dyn QuestionSource,
) -> Turn {
    state.tech_stack = parse_tech_stack(input);

    // Candidate and tech stack must both be persisted before any question
    // is generated; either failure ends the session, not the process.
    let candidate_id = match store.save_candidate(&state.candidate_info).await {
        Ok(id) => id,
        Err(e) => {
            error!("Error saving candidate data: {e}");
            return Turn::end(SAVE_FAILED);
        }
    };
    state.candidate_id = Some(candidate_id);

    if let Err(e) = store.save_tech_stack(candidate_id, &state.tech_stack).await {
        error!("Error saving tech stack for candidate {candidate_id}: {e}");
        return Turn::end(SAVE_FAILED);
    }

    state.technical_questions = generate_tech_questions(&state.tech_stack, questions).await;
    state.answers = Vec::new();
    state.current_question_index = 0;
    state.stage = Stage::TechnicalQuestions;

    // Splitting always yields at least one token, so there is always a
    // first question (fallback-backed when generation failed).
    Turn::next(format!(
        "Technical Assessment\n\nQuestion 1: {}",
        state.technical_questions[0]
    ))
}

async fn handle_technical_answer(
    state: &mut ConversationState,
    input: &str,
    store: &dyn CandidateStore,
) -> Turn {
    state.answers.push(input.to_string());
    state.current_question_index += 1;

    log_history(state, store, "user", input).await;

    if state.current_question_index < state.technical_questions.len() {
        let question = &state.technical_questions[state.current_question_index];
        return Turn::next(format!(
            "Question {}: {question}",
            state.current_question_index + 1
        ));
    }

    // Final answer received: persist the full assessment. A failure here is
    // logged but does not change the completion reply.
    if let Some(candidate_id) = state.candidate_id {
        if let Err(e) = store
            .save_assessment(candidate_id, &state.technical_questions, &state.answers)
            .await
        {
            error!("Error saving assessment for candidate {candidate_id}: {e}");
        }
    }

    Turn::end(ASSESSMENT_COMPLETE)
}

/// Best-effort history write: requires an assigned candidate id and never
/// blocks the user-visible flow.
async fn log_history(
    state: &ConversationState,
    store: &dyn CandidateStore,
    role: &str,
    message: &str,
) {
    if let Some(candidate_id) = state.candidate_id {
        if let Err(e) = store.save_conversation(candidate_id, role, message).await {
            warn!("Error saving conversation for candidate {candidate_id}: {e}");
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
