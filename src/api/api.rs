use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{self, middleware::Logger, web, App, HttpServer};

use super::{errors::json_error_handler, todos_handler};
use crate::config::ServerConfig;
use crate::store::{MemoryStore, MongoStore, TodoStore};

/// Register the todo endpoints
pub fn todo_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/getall", web::get().to(todos_handler::get_all))
        .route("/add", web::post().to(todos_handler::add_todo))
        .route("/update/{id}", web::put().to(todos_handler::update_todo))
        .route("/delete/{id}", web::delete().to(todos_handler::delete_todo));
}

/// Browsers on any origin may call the api
pub fn cors() -> Cors {
    Cors::permissive()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

async fn open_store(config: &ServerConfig) -> std::io::Result<Arc<dyn TodoStore>> {
    if config.in_memory {
        log::warn!("Using in-memory store, todos are lost when the server stops");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = MongoStore::connect(&config.mongo_uri, &config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(Arc::new(store))
}

#[actix_web::main]
pub async fn start_server(config: ServerConfig) -> std::io::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "todo_list=debug,actix_web=info,actix_server=info");
    }

    env_logger::init();

    let store = open_store(&config).await?;
    let data = web::Data::from(store.clone());

    log::info!("Server is running on port {}", config.port);

    let result = HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Logger::default())
            .app_data(data.clone())
            .app_data(json_config())
            .configure(todo_routes)
    })
    .workers(1) // Num of threads
    .bind(("0.0.0.0", config.port))?
    .run()
    .await;

    store.shutdown().await;

    result
}
