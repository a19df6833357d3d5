use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared::domain::{
    CreatedProduct, Direction, PageWindow, Product, ProductId, ProductStatus, ProductVariant,
    VariantId,
};
use tracing::{debug, warn};
use url::Url;

mod documents;
pub mod error;
pub mod workflow;

pub use error::CatalogError;
pub use workflow::{create_product_with_sku, CreateError, CreateOutcome};

use error::body_excerpt;

pub const DEFAULT_API_VERSION: &str = "2024-07";
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Operations the page needs from the remote catalog. Each call is exactly
/// one request/response round trip.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(
        &self,
        limit: u32,
        cursor: Option<&str>,
        direction: Direction,
    ) -> Result<PageWindow, CatalogError>;
    async fn create_product(
        &self,
        title: &str,
        status: ProductStatus,
    ) -> Result<CreatedProduct, CatalogError>;
    async fn set_variant_barcode(
        &self,
        variant_id: &VariantId,
        barcode: &str,
    ) -> Result<ProductVariant, CatalogError>;
    async fn delete_product(&self, product_id: &ProductId) -> Result<(), CatalogError>;
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub endpoint: Url,
    pub access_token: String,
}

impl CatalogConfig {
    pub fn for_shop(
        domain: &str,
        api_version: &str,
        access_token: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            endpoint: endpoint_for_domain(domain, api_version)?,
            access_token: access_token.into(),
        })
    }
}

/// Builds `https://{domain}/admin/api/{version}/graphql.json`. A domain that
/// already carries a scheme is kept as the base.
pub fn endpoint_for_domain(domain: &str, api_version: &str) -> Result<Url, CatalogError> {
    let domain = domain.trim().trim_end_matches('/');
    if domain.is_empty() {
        return Err(CatalogError::InvalidEndpoint("shop domain is empty".into()));
    }
    let api_version = api_version.trim();
    if api_version.is_empty() {
        return Err(CatalogError::InvalidEndpoint("API version is empty".into()));
    }

    let base = if domain.contains("://") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    };
    let raw = format!("{base}/admin/api/{api_version}/graphql.json");
    Url::parse(&raw).map_err(|err| CatalogError::InvalidEndpoint(format!("{raw}: {err}")))
}

pub struct GraphqlCatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl GraphqlCatalogClient {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.config.endpoint
    }

    async fn execute<V, T>(
        &self,
        operation: &'static str,
        query: &'static str,
        variables: V,
    ) -> Result<T, CatalogError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        debug!(operation, endpoint = %self.config.endpoint, "sending catalog request");
        let res = self
            .http
            .post(self.config.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;
        if !status.is_success() {
            let body = body_excerpt(&String::from_utf8_lossy(&body));
            warn!(operation, status = status.as_u16(), "catalog request failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphqlResponse<T> = serde_json::from_slice(&body)?;
        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            let message = join_messages(errors.iter().map(|err| err.message.as_str()));
            warn!(operation, %message, "catalog request returned graphql errors");
            return Err(CatalogError::Graphql(message));
        }
        envelope.data.ok_or(CatalogError::MissingData("data"))
    }
}

#[async_trait]
impl CatalogApi for GraphqlCatalogClient {
    async fn list_products(
        &self,
        limit: u32,
        cursor: Option<&str>,
        direction: Direction,
    ) -> Result<PageWindow, CatalogError> {
        let variables = ListProductsVariables::new(limit, cursor, direction);
        let data: ListProductsData = self
            .execute("list_products", documents::LIST_PRODUCTS, variables)
            .await?;
        Ok(data.products.into_window())
    }

    async fn create_product(
        &self,
        title: &str,
        status: ProductStatus,
    ) -> Result<CreatedProduct, CatalogError> {
        let variables = InputVariables {
            input: CreateProductInput { title, status },
        };
        let data: CreateProductData = self
            .execute("create_product", documents::CREATE_PRODUCT, variables)
            .await?;
        let payload = data.product_create;
        check_user_errors(&payload.user_errors)?;
        let product = payload
            .product
            .ok_or(CatalogError::MissingData("the created product"))?;
        Ok(CreatedProduct {
            product_id: ProductId(product.id),
            variant_id: product
                .variants
                .edges
                .into_iter()
                .next()
                .map(|edge| VariantId(edge.node.id)),
        })
    }

    async fn set_variant_barcode(
        &self,
        variant_id: &VariantId,
        barcode: &str,
    ) -> Result<ProductVariant, CatalogError> {
        let variables = InputVariables {
            input: VariantBarcodeInput {
                id: variant_id.as_str(),
                barcode,
            },
        };
        let data: UpdateVariantData = self
            .execute(
                "set_variant_barcode",
                documents::UPDATE_VARIANT_BARCODE,
                variables,
            )
            .await?;
        let payload = data.product_variant_update;
        check_user_errors(&payload.user_errors)?;
        let variant = payload
            .product_variant
            .ok_or(CatalogError::MissingData("the updated variant"))?;
        Ok(ProductVariant {
            id: VariantId(variant.id),
            barcode: variant.barcode,
        })
    }

    async fn delete_product(&self, product_id: &ProductId) -> Result<(), CatalogError> {
        let variables = InputVariables {
            input: DeleteProductInput {
                id: product_id.as_str(),
            },
        };
        let data: DeleteProductData = self
            .execute("delete_product", documents::DELETE_PRODUCT, variables)
            .await?;
        let payload = data.product_delete;
        check_user_errors(&payload.user_errors)?;
        if payload.deleted_product_id.is_none() {
            return Err(CatalogError::MissingData("the deleted product id"));
        }
        Ok(())
    }
}

fn check_user_errors(errors: &[UserError]) -> Result<(), CatalogError> {
    if errors.is_empty() {
        return Ok(());
    }
    let described: Vec<String> = errors.iter().map(UserError::describe).collect();
    Err(CatalogError::UserErrors(join_messages(
        described.iter().map(String::as_str),
    )))
}

fn join_messages<'a>(messages: impl Iterator<Item = &'a str>) -> String {
    let joined = messages
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    if joined.is_empty() {
        "unknown error".to_string()
    } else {
        joined
    }
}

#[derive(Serialize)]
struct GraphqlRequest<V> {
    query: &'static str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserError {
    #[serde(default)]
    field: Option<Vec<String>>,
    message: String,
}

impl UserError {
    fn describe(&self) -> String {
        match self.field.as_deref() {
            Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), self.message),
            _ => self.message.clone(),
        }
    }
}

/// Forward pages send `first`/`after`, backward pages send `last`/`before`.
#[derive(Debug, Serialize)]
struct ListProductsVariables<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    before: Option<&'a str>,
}

impl<'a> ListProductsVariables<'a> {
    fn new(limit: u32, cursor: Option<&'a str>, direction: Direction) -> Self {
        match direction {
            Direction::Next => Self {
                first: Some(limit),
                after: cursor,
                last: None,
                before: None,
            },
            Direction::Previous => Self {
                first: None,
                after: None,
                last: Some(limit),
                before: cursor,
            },
        }
    }
}

#[derive(Serialize)]
struct InputVariables<I> {
    input: I,
}

#[derive(Serialize)]
struct CreateProductInput<'a> {
    title: &'a str,
    status: ProductStatus,
}

#[derive(Serialize)]
struct VariantBarcodeInput<'a> {
    id: &'a str,
    barcode: &'a str,
}

#[derive(Serialize)]
struct DeleteProductInput<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct Edges<T> {
    edges: Vec<Edge<T>>,
}

#[derive(Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    has_previous_page: bool,
    start_cursor: Option<String>,
    end_cursor: Option<String>,
}

#[derive(Deserialize)]
struct ListProductsData {
    products: ProductConnection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductConnection {
    edges: Vec<Edge<ProductNode>>,
    page_info: PageInfo,
}

impl ProductConnection {
    fn into_window(self) -> PageWindow {
        PageWindow {
            products: self
                .edges
                .into_iter()
                .map(|edge| edge.node.into_product())
                .collect(),
            has_next_page: self.page_info.has_next_page,
            has_previous_page: self.page_info.has_previous_page,
            start_cursor: self.page_info.start_cursor,
            end_cursor: self.page_info.end_cursor,
        }
    }
}

#[derive(Deserialize)]
struct ProductNode {
    id: String,
    title: String,
    status: ProductStatus,
    variants: Edges<VariantNode>,
}

impl ProductNode {
    fn into_product(self) -> Product {
        Product {
            id: ProductId(self.id),
            title: self.title,
            status: self.status,
            primary_variant: self.variants.edges.into_iter().next().map(|edge| ProductVariant {
                id: VariantId(edge.node.id),
                barcode: edge.node.barcode,
            }),
        }
    }
}

#[derive(Deserialize)]
struct VariantNode {
    id: String,
    #[serde(default)]
    barcode: Option<String>,
}

#[derive(Deserialize)]
struct VariantIdNode {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProductData {
    product_create: CreateProductPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProductPayload {
    product: Option<CreatedProductNode>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Deserialize)]
struct CreatedProductNode {
    id: String,
    variants: Edges<VariantIdNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateVariantData {
    product_variant_update: UpdateVariantPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateVariantPayload {
    product_variant: Option<VariantNode>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteProductData {
    product_delete: DeleteProductPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteProductPayload {
    deleted_product_id: Option<String>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
