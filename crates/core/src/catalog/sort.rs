use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::product::Product;

/// Listing order. Applied after filtering with a stable sort, so products that
/// tie on the key keep their catalog order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Popularity,
    Newest,
    PriceLow,
    PriceHigh,
    Alphabetical,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown sort key `{0}` (expected popularity|newest|price-low|price-high|alphabetical)")]
pub struct ParseSortKeyError(String);

impl SortKey {
    pub fn id(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Alphabetical => "alphabetical",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "popularity" => Ok(Self::Popularity),
            "newest" => Ok(Self::Newest),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "alphabetical" => Ok(Self::Alphabetical),
            other => Err(ParseSortKeyError(other.to_owned())),
        }
    }
}

pub(crate) fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        // Rating stands in for popularity.
        SortKey::Popularity => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Newest => products.sort_by(|a, b| b.is_new.cmp(&a.is_new)),
        SortKey::PriceLow => {
            products.sort_by(|a, b| a.effective_price().cmp(&b.effective_price()));
        }
        SortKey::PriceHigh => {
            products.sort_by(|a, b| b.effective_price().cmp(&a.effective_price()));
        }
        SortKey::Alphabetical => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
    }
}
