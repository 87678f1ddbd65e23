use validator::Validate;

use crate::{
    entities::feedback::{Interaction, NewFeedback},
    errors::AppError,
    repositories::{
        alumni::AlumniRepository, feedback::FeedbackRepository, student::StudentRepository,
    },
};

pub struct FeedbackHandler<F, S, A>
where
    F: FeedbackRepository,
    S: StudentRepository,
    A: AlumniRepository,
{
    pub feedback_repo: F,
    pub student_repo: S,
    pub alumni_repo: A,
}

impl<F, S, A> FeedbackHandler<F, S, A>
where
    F: FeedbackRepository,
    S: StudentRepository,
    A: AlumniRepository,
{
    pub fn new(feedback_repo: F, student_repo: S, alumni_repo: A) -> Self {
        FeedbackHandler { feedback_repo, student_repo, alumni_repo }
    }

    /// Stores a rating with its derived reward
    pub async fn submit(&self, request: NewFeedback) -> Result<Interaction, AppError> {
        request.validate()?;

        if !self.student_repo.student_exists(&request.student_id).await? {
            return Err(AppError::NotFound("Student not found".to_string()));
        }
        if !self.alumni_repo.alumnus_exists(&request.alumni_id).await? {
            return Err(AppError::NotFound("Alumni not found".to_string()));
        }

        let interaction = self.feedback_repo
            .create_interaction(&request.prepare_for_insert())
            .await?;

        tracing::info!(
            interaction_id = %interaction.id,
            reward = ?interaction.reward,
            "Feedback recorded"
        );
        Ok(interaction)
    }

    pub async fn list(&self) -> Result<Vec<Interaction>, AppError> {
        self.feedback_repo.list_interactions().await
    }
}
