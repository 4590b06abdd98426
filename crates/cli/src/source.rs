use std::path::PathBuf;
use std::time::Duration;

use fleur_core::catalog::source::{parse_products, read_products_file, CatalogSourceError};
use fleur_core::config::CatalogConfig;
use fleur_core::domain::product::Product;
use fleur_core::fixtures;

/// Where a command gets its product list from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSpec {
    Url(String),
    File(PathBuf),
    Demo,
}

impl SourceSpec {
    /// CLI flags win over config; a configured file path wins over the URL.
    pub fn resolve(
        url: Option<String>,
        file: Option<PathBuf>,
        demo: bool,
        config: &CatalogConfig,
    ) -> Self {
        if demo {
            return Self::Demo;
        }
        if let Some(file) = file {
            return Self::File(file);
        }
        if let Some(url) = url {
            return Self::Url(url);
        }
        if let Some(path) = &config.source_path {
            return Self::File(path.clone());
        }
        Self::Url(config.source_url.clone())
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => path.display().to_string(),
            Self::Demo => "built-in demo catalog".to_string(),
        }
    }
}

pub fn load_products(
    spec: &SourceSpec,
    timeout_secs: u64,
) -> Result<Vec<Product>, CatalogSourceError> {
    match spec {
        SourceSpec::Demo => Ok(fixtures::demo_catalog()),
        SourceSpec::File(path) => read_products_file(path),
        SourceSpec::Url(url) => fetch_products(url, timeout_secs),
    }
}

fn fetch_products(url: &str, timeout_secs: u64) -> Result<Vec<Product>, CatalogSourceError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| CatalogSourceError::Transport(error.to_string()))?;

    let body = runtime.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|error| CatalogSourceError::Transport(error.to_string()))?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|error| CatalogSourceError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogSourceError::Status { status: status.as_u16() });
        }

        response.text().await.map_err(|error| CatalogSourceError::Transport(error.to_string()))
    })?;

    tracing::debug!(url, bytes = body.len(), "fetched catalog payload");
    parse_products(&body)
}
