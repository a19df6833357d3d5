//! The two-step "create" action shared by the page controller and the
//! server's write endpoint.

use shared::domain::{CreatedProduct, FormValues, ProductId};
use thiserror::Error;
use tracing::{info, warn};

use crate::{CatalogApi, CatalogError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    pub product: CreatedProduct,
    pub sku_attached: bool,
}

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("title is required")]
    MissingTitle,
    #[error(transparent)]
    Create(CatalogError),
    /// The product exists remotely but without its SKU. Nothing is rolled back.
    #[error("product {product_id} was created but its SKU could not be attached: {source}")]
    SkuNotAttached {
        product_id: ProductId,
        #[source]
        source: CatalogError,
    },
}

impl CreateError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingTitle)
    }
}

/// Creates a product and, when the form carries a SKU, attaches it to the
/// product's first variant with a second request.
pub async fn create_product_with_sku(
    api: &dyn CatalogApi,
    values: &FormValues,
) -> Result<CreateOutcome, CreateError> {
    let title = values.title.trim();
    if title.is_empty() {
        return Err(CreateError::MissingTitle);
    }

    let product = api
        .create_product(title, values.status)
        .await
        .map_err(CreateError::Create)?;
    info!(product_id = %product.product_id, "product created");

    let Some(sku) = values.trimmed_sku() else {
        return Ok(CreateOutcome {
            product,
            sku_attached: false,
        });
    };

    let attach = match product.variant_id.as_ref() {
        Some(variant_id) => api.set_variant_barcode(variant_id, sku).await.map(|_| ()),
        None => Err(CatalogError::MissingData("a variant on the created product")),
    };
    if let Err(source) = attach {
        warn!(product_id = %product.product_id, error = %source, "sku attachment failed");
        return Err(CreateError::SkuNotAttached {
            product_id: product.product_id,
            source,
        });
    }

    Ok(CreateOutcome {
        product,
        sku_attached: true,
    })
}
