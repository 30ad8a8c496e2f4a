use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::assistant::{Assistant, QuestionSource};
use crate::candidates::CandidateStore;

/// Live sessions, keyed by session id. Each assistant sits behind its own
/// mutex so turns within one session are serialized while different
/// sessions proceed independently.
///
/// Entries are never evicted. Ended sessions stay registered so a late
/// message gets the closing notice rather than a 404, which means the map
/// grows by one entry per created session for the life of the process.
// TODO: evict ended sessions after a grace period, or cap the registry.
pub type SessionRegistry = Arc<RwLock<HashMap<Uuid, Arc<Mutex<Assistant>>>>>;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Default: PgCandidateStore over the Postgres pool.
    pub store: Arc<dyn CandidateStore>,
    /// Pluggable question generation. Default: LlmQuestionSource over the
    /// Anthropic client; tests substitute scripted sources.
    pub questions: Arc<dyn QuestionSource>,
    pub sessions: SessionRegistry,
}
