use crate::{
    domain::matching::{rank, Scored},
    entities::{alumni::Alumnus, recommendation::Recommendation},
    errors::AppError,
    repositories::{alumni::AlumniRepository, student::StudentRepository},
    settings::LifecycleSettings,
    utils::valid_uuid::valid_uuid,
};

pub struct RecommendHandler<S, A>
where
    S: StudentRepository,
    A: AlumniRepository,
{
    pub student_repo: S,
    pub alumni_repo: A,
    pub settings: LifecycleSettings,
}

impl<S, A> RecommendHandler<S, A>
where
    S: StudentRepository,
    A: AlumniRepository,
{
    pub fn new(student_repo: S, alumni_repo: A, settings: LifecycleSettings) -> Self {
        RecommendHandler { student_repo, alumni_repo, settings }
    }

    /// Ranks available alumni by how many of the student's skills they share.
    pub async fn score_and_rank(
        &self,
        student_id: &str,
        top_k: Option<usize>,
    ) -> Result<Vec<Recommendation>, AppError> {
        let student_id = valid_uuid(student_id)?;
        let student = self.student_repo
            .get_student_by_id(&student_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        let top_k = top_k
            .unwrap_or(self.settings.default_top_k)
            .min(self.settings.max_top_k);

        let student_tags = [student.skills.unwrap_or_default()];
        let scored = self.alumni_repo
            .list_available_alumni()
            .await?
            .into_iter()
            .filter(|alumnus| alumnus.mentorship_available)
            .map(|alumnus| {
                let candidate_tags = [alumnus.skills.clone().unwrap_or_default()];
                Scored::evaluate(alumnus, &student_tags, &candidate_tags)
            })
            .collect();

        let ranked = rank(scored, top_k, by_code_then_id);

        tracing::debug!(student_id = %student_id, returned = ranked.len(), "Recommendations ranked");
        Ok(ranked.into_iter().map(Recommendation::from).collect())
    }
}

fn by_code_then_id(a: &Alumnus, b: &Alumnus) -> std::cmp::Ordering {
    a.alumni_code
        .cmp(&b.alumni_code)
        .then_with(|| a.id.cmp(&b.id))
}
