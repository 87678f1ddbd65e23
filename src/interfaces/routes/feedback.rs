use actix_web::web;

use crate::handlers::feedback;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/feedback")
            .route(web::post().to(feedback::submit_feedback))
            .route(web::get().to(feedback::list_feedback))
    );
}
