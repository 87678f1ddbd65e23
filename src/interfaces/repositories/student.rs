use async_trait::async_trait;
use uuid::Uuid;
use std::borrow::Cow;

use crate::{
    entities::student::{Student, StudentInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxStudentRepo,
};


#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn student_exists(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>, AppError>;
    async fn get_student_by_id(&self, id: &Uuid) -> Result<Option<Student>, AppError>;
    async fn create_student(&self, student: &StudentInsert) -> Result<Student, AppError>;
    async fn update_student(&self, student: &Student) -> Result<Student, AppError>;
    async fn list_students(&self) -> Result<Vec<Student>, AppError>;
}

impl SqlxStudentRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxStudentRepo { pool }
    }
}

#[async_trait]
impl StudentRepository for SqlxStudentRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn student_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)"
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    async fn get_student_by_id(&self, id: &Uuid) -> Result<Option<Student>, AppError> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_student(&self, student: &StudentInsert) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(
            r#"INSERT INTO students (
                name,
                email,
                password_hash,
                department,
                year,
                skills,
                interests,
                career_goal
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.password_hash)
        .bind(&student.department)
        .bind(student.year)
        .bind(&student.skills)
        .bind(&student.interests)
        .bind(&student.career_goal)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            match e {
                sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                    AppError::Conflict("Email already registered".to_string())
                }
                _ => AppError::from(e),
            }
        })
    }

    async fn update_student(&self, student: &Student) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET
                name = $2,
                department = $3,
                year = $4,
                skills = $5,
                interests = $6,
                career_goal = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.department)
        .bind(student.year)
        .bind(&student.skills)
        .bind(&student.interests)
        .bind(&student.career_goal)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT * FROM students ORDER BY created_at ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }
}
