use async_trait::async_trait;

use crate::{
    entities::feedback::{Interaction, InteractionInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxFeedbackRepo,
};

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn create_interaction(&self, interaction: &InteractionInsert) -> Result<Interaction, AppError>;
    async fn list_interactions(&self) -> Result<Vec<Interaction>, AppError>;
}

impl SqlxFeedbackRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxFeedbackRepo { pool }
    }
}

#[async_trait]
impl FeedbackRepository for SqlxFeedbackRepo {
    async fn create_interaction(&self, interaction: &InteractionInsert) -> Result<Interaction, AppError> {
        sqlx::query_as::<_, Interaction>(
            r#"
            INSERT INTO interactions (student_id, alumni_id, rating, comment, reward)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(interaction.student_id)
        .bind(interaction.alumni_id)
        .bind(interaction.rating)
        .bind(&interaction.comment)
        .bind(interaction.reward)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn list_interactions(&self) -> Result<Vec<Interaction>, AppError> {
        let interactions = sqlx::query_as::<_, Interaction>(
            "SELECT * FROM interactions ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(interactions)
    }
}
