//! Technical question generation — pluggable, trait-based source with a
//! templated fallback, so a failed or slow LLM call never reaches the
//! candidate.
//!
//! `AppState` holds an `Arc<dyn QuestionSource>`; tests script the source.

use async_trait::async_trait;
use tracing::warn;

use crate::assistant::prompts::{QUESTION_PROMPT_TEMPLATE, QUESTION_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

/// At most this many technical questions per candidate. Technologies beyond
/// the third are never asked about.
const MAX_QUESTIONS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition + live implementation
// ────────────────────────────────────────────────────────────────────────────

/// One short interview question for one technology. May fail or time out;
/// `generate_tech_questions` supplies the fallback.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn generate_question(&self, technology: &str) -> Result<String, LlmError>;
}

/// Live question source backed by the Claude API.
pub struct LlmQuestionSource(pub LlmClient);

#[async_trait]
impl QuestionSource for LlmQuestionSource {
    async fn generate_question(&self, technology: &str) -> Result<String, LlmError> {
        let prompt = QUESTION_PROMPT_TEMPLATE.replace("{tech}", technology);
        self.0.call_text(&prompt, QUESTION_SYSTEM).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestration
// ────────────────────────────────────────────────────────────────────────────

/// Generates one question per technology for the first `MAX_QUESTIONS`
/// technologies, in input order.
///
/// Per technology, independently:
/// - only the first line of the returned text is kept (the source sometimes
///   returns several questions at once)
/// - any failure or blank result substitutes the fallback template
///
/// Calls run sequentially — one outstanding collaborator call at a time.
pub async fn generate_tech_questions(
    tech_stack: &[String],
    source: &dyn QuestionSource,
) -> Vec<String> {
    let mut questions = Vec::new();

    for tech in tech_stack.iter().take(MAX_QUESTIONS) {
        match source.generate_question(tech).await {
            Ok(text) => {
                let question = first_line(&text);
                if question.is_empty() {
                    warn!("Question source returned blank text for '{tech}' — using fallback");
                    questions.push(fallback_question(tech));
                } else {
                    questions.push(question);
                }
            }
            Err(e) => {
                warn!("Error generating question for '{tech}': {e} — using fallback");
                questions.push(fallback_question(tech));
            }
        }
    }

    questions
}

/// Fixed fallback asked when generation fails for a technology.
pub fn fallback_question(tech: &str) -> String {
    format!("Please explain your experience with {tech} and its practical applications.")
}

fn first_line(text: &str) -> String {
    text.trim().lines().next().unwrap_or("").trim().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
