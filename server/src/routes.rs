use actix_web::web;

use crate::handlers;

pub fn todo_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/todo")
            .route("/show", web::get().to(handlers::show_todos))
            .route("/add", web::post().to(handlers::add_todo))
            .route("/update/{id}", web::put().to(handlers::update_todo))
            .route("/delete/{id}", web::delete().to(handlers::delete_todo))
            .route("/status/{id}", web::put().to(handlers::update_status)),
    );
}
