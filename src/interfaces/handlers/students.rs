use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::student::{LoginStudent, NewStudent, StudentUpdate},
    errors::AppError,
    AppState,
};

#[instrument(skip(state, data), fields(email = %data.email))]
pub async fn register_student(
    state: web::Data<AppState>,
    data: web::Json<NewStudent>,
) -> Result<impl Responder, AppError> {
    let student = state.student_handler.register(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(student))
}

#[instrument(skip(state, data))]
pub async fn login_student(
    state: web::Data<AppState>,
    data: web::Json<LoginStudent>,
) -> Result<impl Responder, AppError> {
    let student = state.student_handler.login(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(student))
}

#[instrument(skip(state))]
pub async fn list_students(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let students = state.student_handler.list_students().await?;
    Ok(HttpResponse::Ok().json(students))
}

#[instrument(skip(state))]
pub async fn get_student(
    student_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let student = state.student_handler.get_student(&student_id).await?;
    Ok(HttpResponse::Ok().json(student))
}

#[instrument(skip(state, data))]
pub async fn update_student(
    student_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<StudentUpdate>,
) -> Result<impl Responder, AppError> {
    let student = state.student_handler
        .update_student(&student_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(student))
}
