use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::connection::{NewConnectionRequest, UpdateConnectionStatus},
    errors::AppError,
    AppState,
};

#[instrument(skip(state, data))]
pub async fn create_request(
    state: web::Data<AppState>,
    data: web::Json<NewConnectionRequest>,
) -> Result<impl Responder, AppError> {
    let request = state.connection_handler.create_request(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(request))
}

#[instrument(skip(state))]
pub async fn list_for_student(
    student_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let requests = state.connection_handler.list_for_student(&student_id).await?;
    Ok(HttpResponse::Ok().json(requests))
}

#[instrument(skip(state))]
pub async fn list_for_alumnus(
    alumni_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let requests = state.connection_handler.list_for_alumnus(&alumni_id).await?;
    Ok(HttpResponse::Ok().json(requests))
}

#[instrument(skip(state, data))]
pub async fn set_status(
    request_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateConnectionStatus>,
) -> Result<impl Responder, AppError> {
    let request = state.connection_handler
        .set_status(&request_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(request))
}
