//! PostgreSQL-backed candidate store. Schema lives in `migrations/` and is
//! applied at startup.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assistant::session::CandidateInfo;
use crate::candidates::{CandidateStore, StoreError};
use crate::models::candidate::CandidateRow;

pub struct PgCandidateStore(pub PgPool);

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn save_candidate(&self, info: &CandidateInfo) -> Result<Uuid, StoreError> {
        let name = info.name.as_deref().ok_or(StoreError::Incomplete("name"))?;
        let email = info.email.as_deref().ok_or(StoreError::Incomplete("email"))?;
        let phone = info.phone.as_deref().ok_or(StoreError::Incomplete("phone"))?;
        let experience = info.experience.ok_or(StoreError::Incomplete("experience"))?;
        let position = info
            .position
            .as_deref()
            .ok_or(StoreError::Incomplete("position"))?;
        let location = info
            .location
            .as_deref()
            .ok_or(StoreError::Incomplete("location"))?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO candidates (name, email, phone, experience, "position", location)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(experience)
        .bind(position)
        .bind(location)
        .fetch_one(&self.0)
        .await?;

        info!("Saved candidate {id}");
        Ok(id)
    }

    async fn save_tech_stack(
        &self,
        candidate_id: Uuid,
        tech_stack: &[String],
    ) -> Result<(), StoreError> {
        for technology in tech_stack {
            sqlx::query("INSERT INTO tech_stack (candidate_id, technology) VALUES ($1, $2)")
                .bind(candidate_id)
                .bind(technology)
                .execute(&self.0)
                .await?;
        }

        info!(
            "Saved {} tech stack entries for candidate {candidate_id}",
            tech_stack.len()
        );
        Ok(())
    }

    async fn save_assessment(
        &self,
        candidate_id: Uuid,
        questions: &[String],
        answers: &[String],
    ) -> Result<(), StoreError> {
        if questions.len() != answers.len() {
            warn!(
                "Assessment length mismatch for candidate {candidate_id}: \
                {} questions vs {} answers — saving the paired prefix",
                questions.len(),
                answers.len()
            );
        }

        for (question, answer) in questions.iter().zip(answers.iter()) {
            sqlx::query(
                "INSERT INTO technical_assessments (candidate_id, question, answer) \
                VALUES ($1, $2, $3)",
            )
            .bind(candidate_id)
            .bind(question)
            .bind(answer)
            .execute(&self.0)
            .await?;
        }

        info!("Saved assessment for candidate {candidate_id}");
        Ok(())
    }

    async fn save_conversation(
        &self,
        candidate_id: Uuid,
        role: &str,
        message: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO conversation_history (candidate_id, role, message) VALUES ($1, $2, $3)",
        )
        .bind(candidate_id)
        .bind(role)
        .bind(message)
        .execute(&self.0)
        .await?;

        Ok(())
    }

    async fn get_candidate_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CandidateRow>, StoreError> {
        let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.0)
            .await?;

        Ok(row)
    }
}
