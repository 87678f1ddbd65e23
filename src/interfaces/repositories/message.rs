use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::message::{ConversationQuery, Message, MessageInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxMessageRepo,
};

// Both directions of a student/alumni pair.
const CONVERSATION_FILTER: &str =
    "(sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1)";

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// The latest `limit` messages of a conversation, oldest first.
    async fn recent_messages(
        &self,
        conversation: ConversationQuery,
        limit: usize,
    ) -> Result<Vec<Message>, AppError>;
    async fn conversation(&self, conversation: ConversationQuery) -> Result<Vec<Message>, AppError>;
    /// Stores every message or none of them.
    async fn insert_exchange(&self, messages: &[MessageInsert]) -> Result<Vec<Message>, AppError>;
    async fn delete_conversation(&self, conversation: ConversationQuery) -> Result<u64, AppError>;
}

impl SqlxMessageRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxMessageRepo { pool }
    }
}

fn pair(conversation: &ConversationQuery) -> (Uuid, Uuid) {
    (conversation.student_id, conversation.alumni_id)
}

#[async_trait]
impl MessageRepository for SqlxMessageRepo {
    async fn recent_messages(
        &self,
        conversation: ConversationQuery,
        limit: usize,
    ) -> Result<Vec<Message>, AppError> {
        let (student_id, alumni_id) = pair(&conversation);
        let sql = format!(
            "SELECT * FROM (
                SELECT * FROM messages WHERE {}
                ORDER BY created_at DESC, id DESC
                LIMIT $3
            ) recent
            ORDER BY created_at ASC, id ASC",
            CONVERSATION_FILTER
        );

        let messages = sqlx::query_as::<_, Message>(&sql)
            .bind(student_id)
            .bind(alumni_id)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(messages)
    }

    async fn conversation(&self, conversation: ConversationQuery) -> Result<Vec<Message>, AppError> {
        let (student_id, alumni_id) = pair(&conversation);
        let sql = format!(
            "SELECT * FROM messages WHERE {} ORDER BY created_at ASC, id ASC",
            CONVERSATION_FILTER
        );

        let messages = sqlx::query_as::<_, Message>(&sql)
            .bind(student_id)
            .bind(alumni_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(messages)
    }

    async fn insert_exchange(&self, messages: &[MessageInsert]) -> Result<Vec<Message>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(messages.len());

        for message in messages {
            let row = sqlx::query_as::<_, Message>(
                r#"
                INSERT INTO messages (sender_id, receiver_id, sender_type, receiver_type, content, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(message.sender_id)
            .bind(message.receiver_id)
            .bind(message.sender_role.as_str())
            .bind(message.receiver_role.as_str())
            .bind(&message.content)
            .bind(message.created_at)
            .fetch_one(&mut *tx)
            .await?;

            stored.push(row);
        }

        tx.commit().await?;
        Ok(stored)
    }

    async fn delete_conversation(&self, conversation: ConversationQuery) -> Result<u64, AppError> {
        let (student_id, alumni_id) = pair(&conversation);
        let sql = format!("DELETE FROM messages WHERE {}", CONVERSATION_FILTER);

        let result = sqlx::query(&sql)
            .bind(student_id)
            .bind(alumni_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
