use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlowerId(pub String);

impl fmt::Display for FlowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single stem option in the custom bouquet builder. `price` is per stem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flower {
    pub id: FlowerId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: Decimal,
    pub category: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
}

/// Immutable per-stem reference data for pricing lookups.
#[derive(Clone, Debug, Default)]
pub struct FlowerTable {
    flowers: Vec<Flower>,
}

impl FlowerTable {
    pub fn new(flowers: Vec<Flower>) -> Self {
        Self { flowers }
    }

    pub fn find(&self, flower_id: &FlowerId) -> Option<&Flower> {
        self.flowers.iter().find(|flower| &flower.id == flower_id)
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }
}
