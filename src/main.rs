mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use database::{DocumentStore, MongoDB};
use dotenv::dotenv;
use services::{FirebaseVerifier, ServiceAccount, TokenVerifier};
use std::error::Error;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn build_cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }

    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.environment.default_log_filter()),
    );

    log::info!("🚀 Starting Bill Tracker API ({:?})...", config.environment);

    let account = ServiceAccount::from_base64(&config.firebase_service_key)?;
    let firebase = FirebaseVerifier::new(&account);
    log::info!(
        "🔐 Firebase project: {} ({})",
        firebase.project_id(),
        account.client_email.as_deref().unwrap_or("no client email")
    );
    let verifier: Arc<dyn TokenVerifier> = Arc::new(firebase);

    let db = MongoDB::new(&config).await?;
    let store: Arc<dyn DocumentStore> = Arc::new(db.clone());
    let store_data = web::Data::from(store);

    let (host, port) = config.bind_address();
    let cors_origins = config.cors_allowed_origins.clone();

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Stops gracefully on SIGINT/SIGTERM
    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();
        let verifier = verifier.clone();

        App::new()
            .app_data(store_data.clone())
            .wrap(build_cors(&cors_origins))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi),
            )
            .configure(move |cfg| api::routes::configure(cfg, verifier))
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    log::info!("🛑 HTTP server stopped");
    db.shutdown().await;

    Ok(())
}
