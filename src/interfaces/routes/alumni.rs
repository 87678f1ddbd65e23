use actix_web::web;

use crate::handlers::alumni;

const IMPORT_LIMIT_BYTES: usize = 5 * 1024 * 1024;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/alumni")
            .service(
                web::resource("")
                    .route(web::get().to(alumni::list_alumni))
            )
            .service(
                web::resource("/register")
                    .route(web::post().to(alumni::register_alumnus))
            )
            .service(
                web::resource("/import")
                    .app_data(web::PayloadConfig::new(IMPORT_LIMIT_BYTES))
                    .route(web::post().to(alumni::import_alumni))
            )
            .service(
                web::resource("/{alumni_id}")
                    .route(web::get().to(alumni::get_alumnus))
            )
    );
}
