use crate::{
    api::department,
    config::Config,
    error::{json_error_handler, path_error_handler, query_error_handler},
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Context, Result};
use std::sync::Arc;

pub type ApiLimiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

/// Per-IP limiter allowing `requests_per_min` requests a minute, all of them as a burst.
/// Built once and shared so every worker draws from the same quota.
pub fn build_limiter(requests_per_min: u32) -> Result<ApiLimiter> {
    let per_ms = (60_000 / requests_per_min.max(1) as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("RATE_API_PER_MIN must be a positive integer")?;

    Ok(Arc::new(Governor::new(&cfg)))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: ApiLimiter) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(limiter) // rate limiting
            .configure(department_routes),
    );
}

pub fn department_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/departments")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            // /departments
            .service(
                web::resource("")
                    .route(web::get().to(department::list_departments))
                    .route(web::post().to(department::create_department)),
            )
            // /departments/search?name=
            .service(
                web::resource("/search").route(web::get().to(department::search_departments)),
            )
            // /departments/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(department::get_department))
                    .route(web::put().to(department::update_department))
                    .route(web::delete().to(department::delete_department)),
            ),
    );
}
