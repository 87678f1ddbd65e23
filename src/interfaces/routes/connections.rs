use actix_web::web;

use crate::handlers::connections;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/connect")
            .service(
                web::resource("/request")
                    .route(web::post().to(connections::create_request))
            )
            .service(
                web::resource("/student/{student_id}")
                    .route(web::get().to(connections::list_for_student))
            )
            .service(
                web::resource("/alumni/{alumni_id}")
                    .route(web::get().to(connections::list_for_alumnus))
            )
            .service(
                web::resource("/{request_id}/status")
                    .route(web::post().to(connections::set_status))
            )
    );
}
