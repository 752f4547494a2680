//! HTTP API over [`CityService`].
//!
//! Routes:
//! - `GET /api/cities/queryByPage?page=&size=` - cities by name, paginated
//! - `GET /api/cities/mostPermutableCity` - city whose letters spell the most dictionary words
//! - `GET /health` - liveness probe

pub mod error;

use crate::domain::model::{PaginatedResponse, PermutableCityResponse};
use crate::domain::ports::{CityRepository, WordRepository};
use crate::domain::services::CityService;
use crate::utils::error::{CitiesError, Result};
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ErrorBody;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: i64,
    pub size: i64,
}

/// Builds the API router with CORS restricted to `allowed_origins`.
pub fn router<C, W>(service: Arc<CityService<C, W>>, allowed_origins: &[String]) -> Result<Router>
where
    C: CityRepository + 'static,
    W: WordRepository + 'static,
{
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| CitiesError::InvalidConfigValueError {
                field: "server.allowed_origins".to_string(),
                value: origin.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Ok(Router::new()
        .route("/api/cities/queryByPage", get(query_by_page::<C, W>))
        .route(
            "/api/cities/mostPermutableCity",
            get(most_permutable_city::<C, W>),
        )
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service))
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Cities API listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Cities API stopped");
    Ok(())
}

async fn query_by_page<C, W>(
    State(service): State<Arc<CityService<C, W>>>,
    Query(params): Query<PageParams>,
) -> std::result::Result<Json<PaginatedResponse>, CitiesError>
where
    C: CityRepository + 'static,
    W: WordRepository + 'static,
{
    let response = service.find_cities_in_alphabetical_order(params.page, params.size)?;
    Ok(Json(response))
}

async fn most_permutable_city<C, W>(
    State(service): State<Arc<CityService<C, W>>>,
) -> std::result::Result<Json<PermutableCityResponse>, CitiesError>
where
    C: CityRepository + 'static,
    W: WordRepository + 'static,
{
    // Dictionary matching is CPU bound.
    let response = tokio::task::spawn_blocking(move || service.find_most_permutable_city())
        .await
        .map_err(|e| CitiesError::data_processing(format!("Permutation task failed: {}", e)))??;
    Ok(Json(response))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}
