use actix_web::web;

use crate::handlers::recommend;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/recommend/student/{student_id}")
            .route(web::get().to(recommend::recommend_for_student))
    );
}
