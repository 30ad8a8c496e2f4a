// Conversational intake engine.
// Implements: staged conversation flow, answer validation, technical question
// generation, session HTTP handlers.
// All LLM calls go through llm_client — no direct Anthropic SDK calls here.

pub mod engine;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod session;
pub mod stage;
pub mod validation;

// Re-export the public API consumed by other modules (state, routes).
pub use engine::{Assistant, EngineError, Turn};
pub use questions::{LlmQuestionSource, QuestionSource};
pub use session::{CandidateInfo, ConversationState};
pub use stage::Stage;
