use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::product::Product;

/// Price facet bands. Boundary placement matters: an effective price of exactly
/// 100.00 belongs to `50-100`, not `100-150`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceBand {
    #[serde(rename = "under-50")]
    Under50,
    #[serde(rename = "50-100")]
    From50To100,
    #[serde(rename = "100-150")]
    From100To150,
    #[serde(rename = "over-150")]
    Over150,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown price band `{0}` (expected under-50|50-100|100-150|over-150)")]
pub struct ParsePriceBandError(String);

impl PriceBand {
    pub fn id(self) -> &'static str {
        match self {
            Self::Under50 => "under-50",
            Self::From50To100 => "50-100",
            Self::From100To150 => "100-150",
            Self::Over150 => "over-150",
        }
    }

    pub fn contains(self, effective_price: Decimal) -> bool {
        match self {
            Self::Under50 => effective_price < Decimal::from(50),
            Self::From50To100 => {
                effective_price >= Decimal::from(50) && effective_price <= Decimal::from(100)
            }
            Self::From100To150 => {
                effective_price > Decimal::from(100) && effective_price <= Decimal::from(150)
            }
            Self::Over150 => effective_price > Decimal::from(150),
        }
    }
}

impl std::str::FromStr for PriceBand {
    type Err = ParsePriceBandError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "under-50" => Ok(Self::Under50),
            "50-100" => Ok(Self::From50To100),
            "100-150" => Ok(Self::From100To150),
            "over-150" => Ok(Self::Over150),
            other => Err(ParsePriceBandError(other.to_owned())),
        }
    }
}

/// Active selections for the four listing facets. An empty set for a facet means
/// no restriction on that facet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub occasions: Vec<String>,
    pub flowers: Vec<String>,
    pub colors: Vec<String>,
    pub price: Vec<PriceBand>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.occasions.is_empty()
            && self.flowers.is_empty()
            && self.colors.is_empty()
            && self.price.is_empty()
    }

    /// Conjunctive across facets, disjunctive within one. Keyword matching is a
    /// case-insensitive substring test against tags; the `flowers` and `colors`
    /// facets additionally match against the description text.
    pub fn matches(&self, product: &Product) -> bool {
        facet_matches(&self.occasions, |keyword| tag_match(product, keyword))
            && facet_matches(&self.flowers, |keyword| tag_or_description_match(product, keyword))
            && facet_matches(&self.colors, |keyword| tag_or_description_match(product, keyword))
            && (self.price.is_empty()
                || self.price.iter().any(|band| band.contains(product.effective_price())))
    }
}

fn facet_matches(keywords: &[String], matcher: impl Fn(&str) -> bool) -> bool {
    keywords.is_empty() || keywords.iter().any(|keyword| matcher(&keyword.to_lowercase()))
}

fn tag_match(product: &Product, keyword: &str) -> bool {
    product.tags.iter().any(|tag| tag.to_lowercase().contains(keyword))
}

fn tag_or_description_match(product: &Product, keyword: &str) -> bool {
    tag_match(product, keyword) || product.description.to_lowercase().contains(keyword)
}
