use thiserror::Error;

/// Failure of a single round trip to the catalog API.
///
/// Every variant renders as one operator-facing sentence; callers that only
/// need a banner use `to_string()`.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("could not reach the catalog API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog API responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("catalog API rejected the request: {0}")]
    Graphql(String),
    #[error("{0}")]
    UserErrors(String),
    #[error("catalog API returned an unreadable response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("catalog API response is missing {0}")]
    MissingData(&'static str),
}

const MAX_BODY_EXCERPT: usize = 200;

pub(crate) fn body_excerpt(body: &str) -> String {
    let body = body.trim();
    if body.len() <= MAX_BODY_EXCERPT {
        return body.to_string();
    }
    let mut end = MAX_BODY_EXCERPT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
