//! Spy Cat Agency API server entry point.
//!
//! Wires configuration, the cache backend, the PostgreSQL user
//! repository, and the core services together, then starts the
//! actix-web server.

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenvy::dotenv;
use log::{info, warn};
use std::io;
use std::sync::Arc;

use sca_api::middleware::auth::TokenVerifier;
use sca_api::middleware::cors::create_cors;
use sca_api::routes;
use sca_api::routes::auth::AppState;
use sca_core::services::auth::AuthService;
use sca_core::services::cache::CacheService;
use sca_core::services::token::{TokenService, TokenServiceConfig};
use sca_infra::cache::create_cache;
use sca_infra::database::{connect_pool, ensure_schema, PgUserRepository};
use sca_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    info!("starting {} on {}", config.app_name, config.server.bind_address());

    if config.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    let cache = create_cache(&config.cache).await.map_err(to_io_error)?;
    info!("cache backend ready: {}", config.cache.backend);

    let pool = connect_pool(&config.database).await.map_err(to_io_error)?;
    ensure_schema(&pool).await.map_err(to_io_error)?;
    info!("database pool ready");

    let token_service = Arc::new(TokenService::new(
        cache.clone(),
        TokenServiceConfig::from_jwt(&config.jwt, &config.app_name),
    ));
    let auth_service = AuthService::new(PgUserRepository::new(pool), Arc::clone(&token_service));

    let state = web::Data::new(AppState { auth_service });
    let cache_data = web::Data::new(cache);
    let verifier: Arc<dyn TokenVerifier> = token_service;

    let bind_address = config.server.bind_address();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(state.clone())
            .app_data(cache_data.clone())
            .route("/health", web::get().to(routes::health::health))
            .service(web::scope("/api/v1").service(routes::auth::auth_scope::<
                PgUserRepository,
                Arc<dyn CacheService>,
            >(Arc::clone(&verifier))))
    })
    .bind(bind_address)?
    .run()
    .await
}

fn to_io_error(error: sca_infra::InfraError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error.to_string())
}
