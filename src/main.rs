use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod repository;
mod routes;
mod search;

use config::{Config, StoreKind};
use repository::{DepartmentRepository, InMemoryDepartmentRepository, MySqlDepartmentRepository};

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Department directory is up"
}

async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn DepartmentRepository>> {
    match config.store {
        StoreKind::Memory => {
            info!(
                seeded = config.seed_departments.len(),
                "Using in-memory department store"
            );
            let repo = InMemoryDepartmentRepository::with_names(config.seed_departments.clone())
                .context("Invalid DEPARTMENT_SEED")?;
            Ok(Arc::new(repo))
        }
        StoreKind::MySql => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            let pool = db::init_db(url, config.db_max_connections)
                .await
                .context("Failed to connect to database")?;
            db::ensure_schema(&pool)
                .await
                .context("Failed to prepare departments table")?;

            info!("Using MySQL department store");
            Ok(Arc::new(MySqlDepartmentRepository::new(pool)))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(addr = %config.server_addr, "Server starting...");

    let repository = Data::from(build_repository(&config).await?);
    let limiter = routes::build_limiter(config.rate_api_per_min)?;
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(repository.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &config, limiter.clone()))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run()
    .await?;

    Ok(())
}
