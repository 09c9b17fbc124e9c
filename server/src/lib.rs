pub mod error;
pub mod handlers;
pub mod identity;
pub mod routes;
pub mod store;

use actix_web::web;

use crate::error::ServiceError;

/// Wires routes and request-body handling onto an `App`. The binary and the
/// integration tests build the same application from this; the `TodoStore`
/// is registered separately so tests can seed their own.
pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ServiceError::Validation(err.to_string()).into()
    }));
    cfg.route("/", web::get().to(handlers::index));
    routes::todo_routes(cfg);
}
