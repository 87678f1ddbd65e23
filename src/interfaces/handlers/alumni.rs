use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::alumni::NewAlumnus, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn list_alumni(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let alumni = state.alumni_handler.list_alumni().await?;
    Ok(HttpResponse::Ok().json(alumni))
}

#[instrument(skip(state))]
pub async fn get_alumnus(
    alumni_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let alumnus = state.alumni_handler.get_alumnus(&alumni_id).await?;
    Ok(HttpResponse::Ok().json(alumnus))
}

#[instrument(skip(state, data))]
pub async fn register_alumnus(
    state: web::Data<AppState>,
    data: web::Json<NewAlumnus>,
) -> Result<impl Responder, AppError> {
    let alumnus = state.alumni_handler.register(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(alumnus))
}

/// Body is the raw CSV export.
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn import_alumni(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<impl Responder, AppError> {
    let summary = state.alumni_handler.import_csv(&body).await?;
    Ok(HttpResponse::Ok().json(summary))
}
