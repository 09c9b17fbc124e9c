use actix_web::{middleware::Logger, web, App, HttpServer};
use doable_server::{app_config, store::TodoStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let store = web::Data::new(TodoStore::new());

    log::info!("Server running on port {port}");
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(Logger::default())
            .configure(app_config)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
