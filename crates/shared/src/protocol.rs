//! Wire types of the inbound loader/action endpoints.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{CreatedProduct, Direction, FormValues, PageRequest, ProductId, ProductStatus},
    error::ApiError,
};

pub const PRODUCTS_ROUTE: &str = "/products";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl PageQuery {
    /// Turns the raw query into a page request. A blank or absent direction
    /// walks forward.
    pub fn into_request(self) -> Result<PageRequest, ApiError> {
        let direction = match self.direction.as_deref().map(str::trim) {
            None | Some("") => Direction::default(),
            Some(raw) => raw.parse::<Direction>().map_err(ApiError::validation)?,
        };
        Ok(PageRequest::new(self.cursor, direction))
    }
}

/// Form-encoded body of `POST /products`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductActionForm {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
    Create(FormValues),
    Delete(ProductId),
}

impl TryFrom<ProductActionForm> for ProductAction {
    type Error = ApiError;

    fn try_from(form: ProductActionForm) -> Result<Self, Self::Error> {
        match form.intent.as_deref().map(str::trim) {
            Some("delete") => {
                let product_id = form
                    .product_id
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| ApiError::validation("productId is required to delete"))?;
                Ok(Self::Delete(ProductId(product_id)))
            }
            Some("create") | Some("") | None => {
                let status = match form.status.as_deref().map(str::trim) {
                    None | Some("") => ProductStatus::default(),
                    Some(raw) => raw
                        .parse()
                        .map_err(|err: crate::domain::UnknownStatus| {
                            ApiError::validation(err.to_string())
                        })?,
                };
                Ok(Self::Create(FormValues {
                    title: form.title.unwrap_or_default(),
                    status,
                    sku: form.sku.unwrap_or_default(),
                }))
            }
            Some(other) => Err(ApiError::validation(format!("unknown intent '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductResponse {
    pub product: CreatedProduct,
    pub sku_attached: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductResponse {
    pub deleted_product_id: ProductId,
}
