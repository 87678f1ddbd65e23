use actix_web::web;

use crate::handlers::chat;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/chat")
            .service(
                web::resource("/send")
                    .route(web::post().to(chat::send_message))
            )
            .service(
                web::resource("/history")
                    .route(web::get().to(chat::chat_history))
            )
            .service(
                web::resource("/clear")
                    .route(web::delete().to(chat::clear_chat))
            )
    );
}
