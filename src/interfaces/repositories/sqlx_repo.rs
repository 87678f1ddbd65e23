use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxStudentRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxAlumniRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxConnectionRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxFeedbackRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxMessageRepo {
    pub pool: PgPool,
}
