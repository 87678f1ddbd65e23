use crate::repositories::sqlx_repo::{
    SqlxAlumniRepo, SqlxConnectionRepo, SqlxFeedbackRepo, SqlxMessageRepo, SqlxStudentRepo,
};


#[derive(Clone)]
pub struct SharedRepositories {
    pub student_repo: SqlxStudentRepo,
    pub alumni_repo: SqlxAlumniRepo,
    pub connection_repo: SqlxConnectionRepo,
    pub feedback_repo: SqlxFeedbackRepo,
    pub message_repo: SqlxMessageRepo,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let student_repo = SqlxStudentRepo::new(pool.clone());
        let alumni_repo = SqlxAlumniRepo::new(pool.clone());
        let connection_repo = SqlxConnectionRepo::new(pool.clone());
        let feedback_repo = SqlxFeedbackRepo::new(pool.clone());
        let message_repo = SqlxMessageRepo::new(pool);

        SharedRepositories {
            student_repo,
            alumni_repo,
            connection_repo,
            feedback_repo,
            message_repo,
        }
    }
}
