use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A ready-made bouquet, in the camelCase shape the catalog collaborator emits.
/// Immutable once loaded; the catalog is read-only reference data for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub price: Decimal,
    #[serde(default)]
    pub discounted_price: Option<Decimal>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_bestseller: bool,
}

impl Product {
    /// The price that filtering and sorting see: the discounted price when one is
    /// present, else the base price.
    pub fn effective_price(&self) -> Decimal {
        self.discounted_price.unwrap_or(self.price)
    }

    pub fn is_discounted(&self) -> bool {
        self.discounted_price.is_some()
    }

    /// Repairs the fields the collaborator is allowed to get slightly wrong: a
    /// discounted price at or above the base price is treated as absent, and the
    /// rating is clamped into the 0-5 band.
    pub fn normalized(mut self) -> Self {
        if matches!(self.discounted_price, Some(discounted) if discounted >= self.price) {
            self.discounted_price = None;
        }
        self.rating = self.rating.clamp(0.0, 5.0);
        self
    }
}
