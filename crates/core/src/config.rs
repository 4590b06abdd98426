use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::reference::{ReferenceTables, FALLBACK_SIZE, FALLBACK_STYLE};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub pricing: ReferenceTables,
    pub logging: LoggingConfig,
}

/// Where the product list comes from. The URL points at the external
/// `GET /get-products` collaborator; a file path, when set, wins over it.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub source_url: String,
    pub source_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_source_url: Option<String>,
    pub catalog_source_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                source_url: "http://localhost:8080/get-products".to_string(),
                source_path: None,
                request_timeout_secs: 10,
            },
            pricing: ReferenceTables::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    /// Loads with the precedence defaults < file < environment < explicit
    /// overrides, then validates the result as a whole.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("fleur.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(source_url) = catalog.source_url {
                self.catalog.source_url = source_url;
            }
            if let Some(source_path) = catalog.source_path {
                self.catalog.source_path = Some(source_path);
            }
            if let Some(request_timeout_secs) = catalog.request_timeout_secs {
                self.catalog.request_timeout_secs = request_timeout_secs;
            }
        }

        if let Some(pricing) = patch.pricing {
            if let Some(styles) = pricing.styles {
                self.pricing.styles = styles;
            }
            if let Some(sizes) = pricing.sizes {
                self.pricing.sizes = sizes;
            }
            if let Some(vase_surcharge) = pricing.vase_surcharge {
                self.pricing.vase_surcharge = vase_surcharge;
            }
            if let Some(discount_tiers) = pricing.discount_tiers {
                self.pricing.discount_tiers = discount_tiers;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("FLEUR_CATALOG_SOURCE_URL") {
            self.catalog.source_url = value;
        }
        if let Some(value) = read_env("FLEUR_CATALOG_SOURCE_PATH") {
            self.catalog.source_path = Some(PathBuf::from(value));
        }
        if let Some(value) = read_env("FLEUR_CATALOG_REQUEST_TIMEOUT_SECS") {
            self.catalog.request_timeout_secs =
                parse_u64("FLEUR_CATALOG_REQUEST_TIMEOUT_SECS", &value)?;
        }

        let log_level = read_env("FLEUR_LOGGING_LEVEL").or_else(|| read_env("FLEUR_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format = read_env("FLEUR_LOGGING_FORMAT").or_else(|| read_env("FLEUR_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(catalog_source_url) = overrides.catalog_source_url {
            self.catalog.source_url = catalog_source_url;
        }
        if let Some(catalog_source_path) = overrides.catalog_source_path {
            self.catalog.source_path = Some(catalog_source_path);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_pricing(&self.pricing)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("fleur.toml"), PathBuf::from("config/fleur.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    let url = catalog.source_url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "catalog.source_url must start with http:// or https://".to_string(),
        ));
    }

    if catalog.request_timeout_secs == 0 || catalog.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "catalog.request_timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_pricing(pricing: &ReferenceTables) -> Result<(), ConfigError> {
    if pricing.styles.is_empty() || pricing.sizes.is_empty() {
        return Err(ConfigError::Validation(
            "pricing.styles and pricing.sizes must not be empty".to_string(),
        ));
    }

    if !pricing.styles.iter().any(|style| style.id.0 == FALLBACK_STYLE) {
        return Err(ConfigError::Validation(format!(
            "pricing.styles must include the `{FALLBACK_STYLE}` fallback entry"
        )));
    }
    if !pricing.sizes.iter().any(|size| size.id.0 == FALLBACK_SIZE) {
        return Err(ConfigError::Validation(format!(
            "pricing.sizes must include the `{FALLBACK_SIZE}` fallback entry"
        )));
    }

    if pricing.styles.iter().any(|style| style.surcharge < Decimal::ZERO) {
        return Err(ConfigError::Validation(
            "pricing style surcharges must not be negative".to_string(),
        ));
    }
    if pricing
        .sizes
        .iter()
        .any(|size| size.surcharge < Decimal::ZERO || size.multiplier <= Decimal::ZERO)
    {
        return Err(ConfigError::Validation(
            "pricing sizes need non-negative surcharges and positive multipliers".to_string(),
        ));
    }
    if pricing.vase_surcharge < Decimal::ZERO {
        return Err(ConfigError::Validation(
            "pricing.vase_surcharge must not be negative".to_string(),
        ));
    }

    for tier in &pricing.discount_tiers {
        if tier.threshold <= Decimal::ZERO {
            return Err(ConfigError::Validation(
                "discount tier thresholds must be positive".to_string(),
            ));
        }
        if tier.pay_rate <= Decimal::ZERO || tier.pay_rate > Decimal::ONE {
            return Err(ConfigError::Validation(
                "discount tier pay rates must be in (0, 1]".to_string(),
            ));
        }
    }
    let descending = pricing
        .discount_tiers
        .windows(2)
        .all(|pair| pair[0].threshold > pair[1].threshold);
    if !descending {
        return Err(ConfigError::Validation(
            "discount tiers must be listed in strictly descending threshold order".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    pricing: Option<PricingPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    source_url: Option<String>,
    source_path: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
}

/// Lists replace wholesale; there is no per-entry merging.
#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    styles: Option<Vec<crate::pricing::reference::StyleOption>>,
    sizes: Option<Vec<crate::pricing::reference::SizeOption>>,
    vase_surcharge: Option<Decimal>,
    discount_tiers: Option<Vec<crate::pricing::reference::DiscountTier>>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
