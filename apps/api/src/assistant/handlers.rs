//! Axum route handlers for the intake conversation API.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::info;
use uuid::Uuid;

use crate::assistant::engine::Assistant;
use crate::errors::AppError;
use crate::state::AppState;

/// Hard cap on one conversational turn, LLM calls included.
const TURN_BUDGET: Duration = Duration::from_secs(30);

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub reply: String,
    pub ended: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Opens a new intake conversation and returns its id plus the greeting.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<CreateSessionResponse>, AppError> {
    let assistant = Assistant::new(state.store.clone(), state.questions.clone());
    let message = assistant.greeting().to_string();

    let session_id = Uuid::new_v4();
    state
        .sessions
        .write()
        .await
        .insert(session_id, Arc::new(Mutex::new(assistant)));

    info!("Opened intake session {session_id}");

    Ok(Json(CreateSessionResponse {
        session_id,
        message,
    }))
}

/// POST /api/v1/sessions/:id/messages
///
/// Runs one turn of the conversation. The whole turn — validation, store
/// calls, question generation — shares a single 30-second budget; when it
/// expires the turn is dropped and the session state stays as it was.
pub async fn handle_message(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let session = state
        .sessions
        .read()
        .await
        .get(&session_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let mut assistant = session.lock().await;
    let turn = timeout(TURN_BUDGET, assistant.process_input(&request.text))
        .await
        .map_err(|_| AppError::TurnTimeout)??;

    Ok(Json(MessageResponse {
        reply: turn.reply,
        ended: turn.ended,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::assistant::questions::QuestionSource;
    use crate::assistant::session::CandidateInfo;
    use crate::candidates::{CandidateStore, StoreError};
    use crate::llm_client::LlmError;
    use crate::models::candidate::CandidateRow;

    struct NullStore;

    #[async_trait]
    impl CandidateStore for NullStore {
        async fn save_candidate(&self, _info: &CandidateInfo) -> Result<Uuid, StoreError> {
            Ok(Uuid::new_v4())
        }

        async fn save_tech_stack(
            &self,
            _candidate_id: Uuid,
            _tech_stack: &[String],
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn save_assessment(
            &self,
            _candidate_id: Uuid,
            _questions: &[String],
            _answers: &[String],
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn save_conversation(
            &self,
            _candidate_id: Uuid,
            _role: &str,
            _message: &str,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn get_candidate_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<CandidateRow>, StoreError> {
            Ok(None)
        }
    }

    /// Store whose first email lookup stalls well past the turn budget;
    /// later lookups answer immediately, so a timed-out turn can be
    /// re-submitted.
    #[derive(Default)]
    struct StallOnceStore {
        stalled: AtomicBool,
    }

    #[async_trait]
    impl CandidateStore for StallOnceStore {
        async fn save_candidate(&self, _info: &CandidateInfo) -> Result<Uuid, StoreError> {
            Ok(Uuid::new_v4())
        }

        async fn save_tech_stack(
            &self,
            _candidate_id: Uuid,
            _tech_stack: &[String],
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn save_assessment(
            &self,
            _candidate_id: Uuid,
            _questions: &[String],
            _answers: &[String],
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn save_conversation(
            &self,
            _candidate_id: Uuid,
            _role: &str,
            _message: &str,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn get_candidate_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<CandidateRow>, StoreError> {
            // Mark before sleeping: the stalled call gets dropped mid-sleep
            // by the turn timeout.
            if !self.stalled.swap(true, Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_secs(120)).await;
            }
            Ok(None)
        }
    }

    struct TemplateQuestions;

    #[async_trait]
    impl QuestionSource for TemplateQuestions {
        async fn generate_question(&self, technology: &str) -> Result<String, LlmError> {
            Ok(format!("What have you built with {technology}?"))
        }
    }

    fn test_state(store: Arc<dyn CandidateStore>) -> AppState {
        AppState {
            store,
            questions: Arc::new(TemplateQuestions),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn send(
        state: &AppState,
        session_id: Uuid,
        text: &str,
    ) -> Result<Json<MessageResponse>, AppError> {
        handle_message(
            State(state.clone()),
            Path(session_id),
            Json(MessageRequest {
                text: text.to_string(),
            }),
        )
        .await
    }

    #[tokio::test]
    async fn test_create_session_returns_greeting_and_registers() {
        let state = test_state(Arc::new(NullStore));

        let response = handle_create_session(State(state.clone())).await.unwrap();

        assert!(response.0.message.starts_with("Hello! I'm the TalentScout"));
        assert!(state
            .sessions
            .read()
            .await
            .contains_key(&response.0.session_id));
    }

    #[tokio::test]
    async fn test_message_routes_to_the_right_session() {
        let state = test_state(Arc::new(NullStore));
        let created = handle_create_session(State(state.clone())).await.unwrap();

        let turn = send(&state, created.0.session_id, "Hello").await.unwrap();

        assert_eq!(turn.0.reply, "Could you please share your full name?");
        assert!(!turn.0.ended);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let state = test_state(Arc::new(NullStore));

        let result = send(&state, Uuid::new_v4(), "Hello").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_turn_times_out() {
        let state = test_state(Arc::new(StallOnceStore::default()));
        let created = handle_create_session(State(state.clone())).await.unwrap();
        let session_id = created.0.session_id;

        send(&state, session_id, "Hello").await.unwrap();
        send(&state, session_id, "Jane Doe").await.unwrap();

        // The email stage hits the stalled lookup.
        let result = send(&state, session_id, "jane@example.com").await;

        assert!(matches!(result, Err(AppError::TurnTimeout)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_turn_can_be_retried_from_the_same_stage() {
        let state = test_state(Arc::new(StallOnceStore::default()));
        let created = handle_create_session(State(state.clone())).await.unwrap();
        let session_id = created.0.session_id;

        send(&state, session_id, "Hello").await.unwrap();
        send(&state, session_id, "Jane Doe").await.unwrap();

        let first = send(&state, session_id, "jane@example.com").await;
        assert!(matches!(first, Err(AppError::TurnTimeout)));

        // The dropped turn committed nothing, so the session is still at
        // the email stage and the same input now goes through.
        let retry = send(&state, session_id, "jane@example.com").await.unwrap();
        assert_eq!(
            retry.0.reply,
            "Thank you! Now, please share your phone number."
        );
        assert!(!retry.0.ended);
    }

    #[test]
    fn test_response_shapes_serialize_with_stable_keys() {
        let message = serde_json::to_value(MessageResponse {
            reply: "Thank you!".to_string(),
            ended: false,
        })
        .unwrap();
        assert_eq!(message["reply"], "Thank you!");
        assert_eq!(message["ended"], false);

        let session_id = Uuid::new_v4();
        let created = serde_json::to_value(CreateSessionResponse {
            session_id,
            message: "Hello!".to_string(),
        })
        .unwrap();
        assert_eq!(created["session_id"], session_id.to_string());
        assert_eq!(created["message"], "Hello!");
    }
}
