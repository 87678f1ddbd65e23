use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod alumni;
mod chat;
mod connections;
mod email;
mod feedback;
mod json_error;
mod recommend;
mod students;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.configure(students::config_routes)
        .configure(alumni::config_routes)
        .configure(recommend::config_routes)
        .configure(feedback::config_routes)
        .configure(connections::config_routes)
        .configure(chat::config_routes)
        .configure(email::config_routes);

    cfg.configure(json_error::config_routes);
}
