use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::email::EmailToMentor, errors::AppError, AppState};

#[instrument(skip(state, data), fields(student_id = %data.student_id))]
pub async fn send_to_mentor(
    state: web::Data<AppState>,
    data: web::Json<EmailToMentor>,
) -> Result<impl Responder, AppError> {
    state.send_limiter.check(&data.student_id.to_string())?;

    let response = state.email_handler.send_to_mentor(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
