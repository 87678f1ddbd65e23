use async_trait::async_trait;
use std::borrow::Cow;
use uuid::Uuid;

use crate::{
    entities::alumni::{Alumnus, AlumnusInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxAlumniRepo,
};

const INSERT_ALUMNUS: &str = r#"
    INSERT INTO alumni (
        alumni_code, name, email, graduation_year, department, job_role,
        company, experience_years, skills, domain, location, mentorship_available
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
    RETURNING *
"#;

#[async_trait]
pub trait AlumniRepository: Send + Sync {
    async fn alumnus_exists(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn get_alumnus_by_id(&self, id: &Uuid) -> Result<Option<Alumnus>, AppError>;
    async fn get_alumnus_by_email(&self, email: &str) -> Result<Option<Alumnus>, AppError>;
    async fn create_alumnus(&self, alumnus: &AlumnusInsert) -> Result<Alumnus, AppError>;
    async fn create_alumni_batch(&self, alumni: &[AlumnusInsert]) -> Result<u64, AppError>;
    async fn list_alumni(&self) -> Result<Vec<Alumnus>, AppError>;
    async fn list_available_alumni(&self) -> Result<Vec<Alumnus>, AppError>;
    async fn count_alumni(&self) -> Result<u64, AppError>;
}

impl SqlxAlumniRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxAlumniRepo { pool }
    }
}

fn map_unique_violation(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
            AppError::Conflict("An alumni with this email or code already exists".to_string())
        }
        _ => AppError::from(e),
    }
}

fn bind_insert<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, Alumnus, sqlx::postgres::PgArguments>,
    alumnus: &'q AlumnusInsert,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Alumnus, sqlx::postgres::PgArguments> {
    query
        .bind(&alumnus.alumni_code)
        .bind(&alumnus.name)
        .bind(&alumnus.email)
        .bind(alumnus.graduation_year)
        .bind(&alumnus.department)
        .bind(&alumnus.current_role)
        .bind(&alumnus.company)
        .bind(alumnus.experience_years)
        .bind(&alumnus.skills)
        .bind(&alumnus.domain)
        .bind(&alumnus.location)
        .bind(alumnus.mentorship_available)
}

#[async_trait]
impl AlumniRepository for SqlxAlumniRepo {
    async fn alumnus_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM alumni WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn get_alumnus_by_id(&self, id: &Uuid) -> Result<Option<Alumnus>, AppError> {
        sqlx::query_as::<_, Alumnus>("SELECT * FROM alumni WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_alumnus_by_email(&self, email: &str) -> Result<Option<Alumnus>, AppError> {
        sqlx::query_as::<_, Alumnus>("SELECT * FROM alumni WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_alumnus(&self, alumnus: &AlumnusInsert) -> Result<Alumnus, AppError> {
        bind_insert(sqlx::query_as::<_, Alumnus>(INSERT_ALUMNUS), alumnus)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)
    }

    async fn create_alumni_batch(&self, alumni: &[AlumnusInsert]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        for alumnus in alumni {
            bind_insert(sqlx::query_as::<_, Alumnus>(INSERT_ALUMNUS), alumnus)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_unique_violation)?;
        }

        tx.commit().await?;
        Ok(alumni.len() as u64)
    }

    async fn list_alumni(&self) -> Result<Vec<Alumnus>, AppError> {
        let alumni = sqlx::query_as::<_, Alumnus>("SELECT * FROM alumni ORDER BY alumni_code ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(alumni)
    }

    async fn list_available_alumni(&self) -> Result<Vec<Alumnus>, AppError> {
        let alumni = sqlx::query_as::<_, Alumnus>(
            "SELECT * FROM alumni WHERE mentorship_available = TRUE ORDER BY alumni_code ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(alumni)
    }

    async fn count_alumni(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM alumni")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}
