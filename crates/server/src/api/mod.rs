use std::sync::Arc;

use catalog_client::{create_product_with_sku, CatalogApi, CatalogError, CreateError};
use shared::{
    domain::{FormValues, PageRequest, PageWindow, ProductId, PAGE_SIZE},
    error::ApiError,
    protocol::{CreateProductResponse, DeleteProductResponse},
};
use tracing::info;

#[derive(Clone)]
pub struct ApiContext {
    pub catalog: Arc<dyn CatalogApi>,
    pub page_size: u32,
}

impl ApiContext {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self {
            catalog,
            page_size: PAGE_SIZE,
        }
    }
}

pub async fn list_page(ctx: &ApiContext, request: &PageRequest) -> Result<PageWindow, ApiError> {
    ctx.catalog
        .list_products(ctx.page_size, request.cursor.as_deref(), request.direction)
        .await
        .map_err(upstream)
}

pub async fn create_product(
    ctx: &ApiContext,
    values: &FormValues,
) -> Result<CreateProductResponse, ApiError> {
    let outcome = create_product_with_sku(ctx.catalog.as_ref(), values)
        .await
        .map_err(|err: CreateError| {
            if err.is_validation() {
                ApiError::validation(err.to_string())
            } else {
                ApiError::upstream(err.to_string())
            }
        })?;
    Ok(CreateProductResponse {
        product: outcome.product,
        sku_attached: outcome.sku_attached,
    })
}

pub async fn delete_product(
    ctx: &ApiContext,
    product_id: ProductId,
) -> Result<DeleteProductResponse, ApiError> {
    ctx.catalog
        .delete_product(&product_id)
        .await
        .map_err(upstream)?;
    info!(%product_id, "product deleted");
    Ok(DeleteProductResponse {
        deleted_product_id: product_id,
    })
}

fn upstream(err: CatalogError) -> ApiError {
    ApiError::upstream(err.to_string())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
pub(crate) mod tests;
