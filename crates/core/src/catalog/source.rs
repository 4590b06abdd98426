use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::product::Product;

/// Failure modes of the external catalog collaborator. The query engine is
/// never invoked until a load succeeds; callers surface these to the UI as an
/// opaque error state.
#[derive(Debug, Error)]
pub enum CatalogSourceError {
    #[error("catalog request failed with status {status}")]
    Status { status: u16 },
    #[error("catalog source unreachable: {0}")]
    Transport(String),
    #[error("catalog payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Decodes a `GET /get-products` response body into a normalized catalog.
/// Tolerates `discountedPrice: null`, unknown fields, and any tag casing.
pub fn parse_products(body: &str) -> Result<Vec<Product>, CatalogSourceError> {
    let products: Vec<Product> = serde_json::from_str(body)?;
    Ok(products.into_iter().map(Product::normalized).collect())
}

pub fn read_products_file(path: &Path) -> Result<Vec<Product>, CatalogSourceError> {
    let body = fs::read_to_string(path)
        .map_err(|source| CatalogSourceError::ReadFile { path: path.to_path_buf(), source })?;
    parse_products(&body)
}
