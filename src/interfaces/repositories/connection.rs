use async_trait::async_trait;
use std::borrow::Cow;
use uuid::Uuid;

use crate::{
    entities::connection::{
        ConnectionParty, ConnectionRequest, ConnectionRequestRow, ConnectionStatus,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxConnectionRepo,
};

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    async fn find_pending(
        &self,
        student_id: &Uuid,
        alumni_id: &Uuid,
    ) -> Result<Option<ConnectionRequest>, AppError>;
    async fn create_request(
        &self,
        student_id: &Uuid,
        alumni_id: &Uuid,
    ) -> Result<ConnectionRequest, AppError>;
    async fn list_by_party(&self, party: ConnectionParty) -> Result<Vec<ConnectionRequest>, AppError>;
    /// Flips still-pending rows among `ids` to `Accepted`; returns the rows that changed.
    async fn mark_accepted(&self, ids: &[Uuid]) -> Result<Vec<ConnectionRequest>, AppError>;
    async fn update_status(
        &self,
        id: &Uuid,
        status: ConnectionStatus,
    ) -> Result<ConnectionRequest, AppError>;
}

impl SqlxConnectionRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxConnectionRepo { pool }
    }
}

fn into_requests(rows: Vec<ConnectionRequestRow>) -> Result<Vec<ConnectionRequest>, AppError> {
    rows.into_iter().map(ConnectionRequest::try_from).collect()
}

#[async_trait]
impl ConnectionRepository for SqlxConnectionRepo {
    async fn find_pending(
        &self,
        student_id: &Uuid,
        alumni_id: &Uuid,
    ) -> Result<Option<ConnectionRequest>, AppError> {
        let row = sqlx::query_as::<_, ConnectionRequestRow>(
            r#"
            SELECT * FROM connection_requests
            WHERE student_id = $1 AND alumni_id = $2 AND status = 'Pending'
            LIMIT 1
            "#,
        )
        .bind(student_id)
        .bind(alumni_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ConnectionRequest::try_from).transpose()
    }

    async fn create_request(
        &self,
        student_id: &Uuid,
        alumni_id: &Uuid,
    ) -> Result<ConnectionRequest, AppError> {
        let row = sqlx::query_as::<_, ConnectionRequestRow>(
            r#"
            INSERT INTO connection_requests (student_id, alumni_id, status)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(alumni_id)
        .bind(ConnectionStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // Lost a race against a concurrent request for the same pair.
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict(
                    "A pending request already exists for this student and alumni.".to_string(),
                )
            }
            _ => AppError::from(e),
        })?;

        ConnectionRequest::try_from(row)
    }

    async fn list_by_party(&self, party: ConnectionParty) -> Result<Vec<ConnectionRequest>, AppError> {
        let (sql, id) = match party {
            ConnectionParty::Student(id) => (
                "SELECT * FROM connection_requests WHERE student_id = $1 ORDER BY created_at DESC",
                id,
            ),
            ConnectionParty::Alumnus(id) => (
                "SELECT * FROM connection_requests WHERE alumni_id = $1 ORDER BY created_at DESC",
                id,
            ),
        };

        let rows = sqlx::query_as::<_, ConnectionRequestRow>(sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        into_requests(rows)
    }

    async fn mark_accepted(&self, ids: &[Uuid]) -> Result<Vec<ConnectionRequest>, AppError> {
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query_as::<_, ConnectionRequestRow>(
            r#"
            UPDATE connection_requests
            SET status = 'Accepted', updated_at = NOW()
            WHERE id = ANY($1) AND status = 'Pending'
            RETURNING *
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        into_requests(rows)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: ConnectionStatus,
    ) -> Result<ConnectionRequest, AppError> {
        let row = sqlx::query_as::<_, ConnectionRequestRow>(
            r#"
            UPDATE connection_requests
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Connection request not found".to_string()))?;

        ConnectionRequest::try_from(row)
    }
}
