use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::entities::student::{
    normalize_email, LoginStudent, NewStudent, StudentResponse, StudentUpdate,
};
use crate::errors::AppError;
use crate::repositories::student::StudentRepository;
use crate::utils::valid_uuid::valid_uuid;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct StudentHandler<R>
where
    R: StudentRepository,
{
    pub student_repo: R,
}

impl<R> StudentHandler<R>
where
    R: StudentRepository,
{
    pub fn new(student_repo: R) -> Self {
        StudentHandler { student_repo }
    }

    /// Registers a new student after validation and password hashing
    pub async fn register(&self, request: NewStudent) -> Result<StudentResponse, AppError> {
        request.validate()?;

        let hashed_password = hash_password(&request.password)?;
        let student_insert = request.prepare_for_insert(hashed_password);

        let student = self.student_repo.create_student(&student_insert).await?;

        tracing::info!(student_id = %student.id, "Student registered");
        Ok(student.into())
    }

    /// Checks credentials; unknown email and wrong password look the same to the caller
    pub async fn login(&self, request: LoginStudent) -> Result<StudentResponse, AppError> {
        request.validate()?;

        let student = self.student_repo
            .get_student_by_email(&normalize_email(&request.email))
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let is_password_valid = verify_password(&request.password, &student.password_hash)
            .map_err(|e| {
                tracing::warn!(student_id = %student.id, "Stored password hash unusable: {}", e);
                AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
            })?;
        if !is_password_valid {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        tracing::info!(student_id = %student.id, "Student logged in");
        Ok(student.into())
    }

    pub async fn list_students(&self) -> Result<Vec<StudentResponse>, AppError> {
        let students = self.student_repo.list_students().await?;
        Ok(students.into_iter().map(StudentResponse::from).collect())
    }

    pub async fn get_student(&self, id: &str) -> Result<StudentResponse, AppError> {
        let valid_id = valid_uuid(id)?;
        self.find_student(&valid_id).await.map(StudentResponse::from)
    }

    /// Applies a partial profile update; an empty patch returns the record unchanged
    pub async fn update_student(
        &self,
        id: &str,
        update: StudentUpdate,
    ) -> Result<StudentResponse, AppError> {
        update.validate()?;
        let valid_id = valid_uuid(id)?;

        let mut student = self.find_student(&valid_id).await?;
        if update.is_empty() {
            return Ok(student.into());
        }

        student.apply_update(update);
        let updated = self.student_repo.update_student(&student).await?;

        tracing::info!(student_id = %updated.id, "Student profile updated");
        Ok(updated.into())
    }

    async fn find_student(&self, id: &Uuid) -> Result<crate::entities::student::Student, AppError> {
        self.student_repo
            .get_student_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }
}
