use validator::Validate;

use crate::{
    entities::email::{EmailSentResponse, EmailToMentor, OutgoingEmail},
    errors::AppError,
    repositories::{alumni::AlumniRepository, mailer::Mailer, student::StudentRepository},
};

pub struct EmailHandler<S, A, T>
where
    S: StudentRepository,
    A: AlumniRepository,
    T: Mailer,
{
    pub student_repo: S,
    pub alumni_repo: A,
    pub mailer: T,
    pub mentor_inbox: String,
}

impl<S, A, T> EmailHandler<S, A, T>
where
    S: StudentRepository,
    A: AlumniRepository,
    T: Mailer,
{
    pub fn new(student_repo: S, alumni_repo: A, mailer: T, mentor_inbox: String) -> Self {
        EmailHandler {
            student_repo,
            alumni_repo,
            mailer,
            mentor_inbox,
        }
    }

    /// Relays a student's note to the mentor inbox; replies go straight to the student
    pub async fn send_to_mentor(&self, request: EmailToMentor) -> Result<EmailSentResponse, AppError> {
        request.validate()?;

        let student = self.student_repo.get_student_by_id(&request.student_id).await?;
        let alumnus = self.alumni_repo.get_alumnus_by_id(&request.alumni_id).await?;
        let (student, alumnus) = match (student, alumnus) {
            (Some(student), Some(alumnus)) => (student, alumnus),
            _ => return Err(AppError::NotFound("Student or Alumni not found".to_string())),
        };

        let email = OutgoingEmail::to_mentor(&student, &alumnus, &request, &self.mentor_inbox);
        self.mailer.send(&email).await?;

        tracing::info!(
            student_id = %student.id,
            alumni_id = %alumnus.id,
            "Mentor email sent"
        );
        Ok(EmailSentResponse {
            success: true,
            sent_to: email.to,
            reply_to: email.reply_to,
        })
    }
}
