#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted candidate. Identity is the email (UNIQUE) — the row the
/// duplicate-interview check reads back.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: f64,
    pub position: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}
