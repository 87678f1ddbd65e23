use actix_web::web;

use crate::handlers::email;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/email/send")
            .route(web::post().to(email::send_to_mentor))
    );
}
