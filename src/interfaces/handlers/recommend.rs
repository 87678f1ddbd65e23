use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::recommendation::RecommendQuery, errors::AppError, AppState};

#[instrument(skip(state, query))]
pub async fn recommend_for_student(
    student_id: web::Path<String>,
    state: web::Data<AppState>,
    query: web::Query<RecommendQuery>,
) -> Result<impl Responder, AppError> {
    let recommendations = state.recommend_handler
        .score_and_rank(&student_id, query.top_k)
        .await?;

    Ok(HttpResponse::Ok().json(recommendations))
}
