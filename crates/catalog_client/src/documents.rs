//! Fixed GraphQL documents sent to the Admin API.

pub const LIST_PRODUCTS: &str = r#"
query ListProducts($first: Int, $after: String, $last: Int, $before: String) {
  products(first: $first, after: $after, last: $last, before: $before) {
    edges {
      node {
        id
        title
        status
        variants(first: 1) {
          edges {
            node {
              id
              barcode
            }
          }
        }
      }
    }
    pageInfo {
      hasNextPage
      hasPreviousPage
      startCursor
      endCursor
    }
  }
}
"#;

pub const CREATE_PRODUCT: &str = r#"
mutation CreateProduct($input: ProductInput!) {
  productCreate(input: $input) {
    product {
      id
      variants(first: 1) {
        edges {
          node {
            id
          }
        }
      }
    }
    userErrors {
      field
      message
    }
  }
}
"#;

pub const UPDATE_VARIANT_BARCODE: &str = r#"
mutation UpdateVariantBarcode($input: ProductVariantInput!) {
  productVariantUpdate(input: $input) {
    productVariant {
      id
      barcode
    }
    userErrors {
      field
      message
    }
  }
}
"#;

pub const DELETE_PRODUCT: &str = r#"
mutation DeleteProduct($input: ProductDeleteInput!) {
  productDelete(input: $input) {
    deletedProductId
    userErrors {
      field
      message
    }
  }
}
"#;
