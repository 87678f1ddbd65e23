use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::message::{ConversationQuery, NewChatMessage},
    errors::AppError,
    AppState,
};

#[instrument(skip(state, data), fields(student_id = %data.student_id, alumni_id = %data.alumni_id))]
pub async fn send_message(
    state: web::Data<AppState>,
    data: web::Json<NewChatMessage>,
) -> Result<impl Responder, AppError> {
    state.send_limiter.check(&data.student_id.to_string())?;

    let reply = state.chat_handler.send(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reply))
}

#[instrument(skip(state))]
pub async fn chat_history(
    state: web::Data<AppState>,
    query: web::Query<ConversationQuery>,
) -> Result<impl Responder, AppError> {
    let messages = state.chat_handler.history(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[instrument(skip(state))]
pub async fn clear_chat(
    state: web::Data<AppState>,
    query: web::Query<ConversationQuery>,
) -> Result<impl Responder, AppError> {
    let response = state.chat_handler.clear(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
