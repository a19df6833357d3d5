use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::get,
    Form, Json, Router,
};
use catalog_client::{CatalogConfig, GraphqlCatalogClient};
use shared::{
    domain::PageWindow,
    error::{ApiError, ErrorCode},
    protocol::{PageQuery, ProductAction, ProductActionForm, PRODUCTS_ROUTE},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, error, info};

mod api;
mod app_state;
mod config;

use api::ApiContext;
use app_state::AppState;
use config::load_settings;

const MAX_FORM_BYTES: usize = 16 * 1024;

type HttpError = (StatusCode, Json<ApiError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings().map_err(|error| {
        error!(%error, "refusing to start without catalog credentials");
        error
    })?;
    let catalog = GraphqlCatalogClient::new(CatalogConfig::for_shop(
        &settings.shopify_domain,
        &settings.shopify_api_version,
        &settings.shopify_access_token,
    )?);
    info!(endpoint = %catalog.endpoint(), "catalog client ready");

    let state = AppState {
        api: ApiContext::new(Arc::new(catalog)),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address {}", settings.server_bind))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            PRODUCTS_ROUTE,
            get(http_list_products)
                .post(http_product_action)
                .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES)),
        )
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_products(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageWindow>, HttpError> {
    let Query(q) =
        query.map_err(|rejection| rejected(rejection.status(), rejection.body_text()))?;
    let request = q.into_request().map_err(error_response)?;
    debug!(cursor = ?request.cursor, direction = %request.direction, "listing products");
    let window = api::list_page(&state.api, &request)
        .await
        .map_err(error_response)?;
    Ok(Json(window))
}

async fn http_product_action(
    State(state): State<Arc<AppState>>,
    form: Result<Form<ProductActionForm>, FormRejection>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let Form(form) =
        form.map_err(|rejection| rejected(rejection.status(), rejection.body_text()))?;
    let action = ProductAction::try_from(form).map_err(error_response)?;
    debug!(?action, "dispatching product action");
    let body = match action {
        ProductAction::Create(values) => {
            let created = api::create_product(&state.api, &values)
                .await
                .map_err(error_response)?;
            serde_json::to_value(created)
        }
        ProductAction::Delete(product_id) => {
            let deleted = api::delete_product(&state.api, product_id)
                .await
                .map_err(error_response)?;
            serde_json::to_value(deleted)
        }
    }
    .map_err(|e| error_response(ApiError::new(ErrorCode::Internal, e.to_string())))?;
    Ok(Json(body))
}

fn error_response(err: ApiError) -> HttpError {
    let status = match err.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Upstream => StatusCode::BAD_GATEWAY,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(code = ?err.code, message = %err.message, "product request failed");
    }
    (status, Json(err))
}

/// Extractor rejections keep axum's status but use the `{code, message}` body.
fn rejected(status: StatusCode, message: String) -> HttpError {
    debug!(%status, %message, "request rejected before dispatch");
    (status, Json(ApiError::validation(message)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
