use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::feedback::NewFeedback, errors::AppError, AppState};

#[instrument(skip(state, data))]
pub async fn submit_feedback(
    state: web::Data<AppState>,
    data: web::Json<NewFeedback>,
) -> Result<impl Responder, AppError> {
    let interaction = state.feedback_handler.submit(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(interaction))
}

#[instrument(skip(state))]
pub async fn list_feedback(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let interactions = state.feedback_handler.list().await?;
    Ok(HttpResponse::Ok().json(interactions))
}
