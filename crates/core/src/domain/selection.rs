use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::flower::FlowerId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleId(pub String);

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeId(pub String);

impl fmt::Display for SizeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the builder UI holds while a customer composes a custom bouquet.
/// Rebuilt on every interaction; there is no history and no undo.
///
/// Invariant: `stems` never contains a zero-quantity entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BouquetSelection {
    stems: BTreeMap<FlowerId, u32>,
    pub style: StyleId,
    pub size: SizeId,
    pub vase: bool,
    pub gift_message: Option<String>,
}

impl Default for BouquetSelection {
    fn default() -> Self {
        Self::new(StyleId("classic".to_owned()), SizeId("medium".to_owned()))
    }
}

impl BouquetSelection {
    pub fn new(style: StyleId, size: SizeId) -> Self {
        Self { stems: BTreeMap::new(), style, size, vase: false, gift_message: None }
    }

    pub fn add_stem(&mut self, flower_id: FlowerId) {
        *self.stems.entry(flower_id).or_insert(0) += 1;
    }

    pub fn remove_stem(&mut self, flower_id: &FlowerId) {
        if let Some(quantity) = self.stems.get_mut(flower_id) {
            *quantity -= 1;
            if *quantity == 0 {
                self.stems.remove(flower_id);
            }
        }
    }

    /// Sets an absolute quantity; zero removes the entry entirely.
    pub fn set_stems(&mut self, flower_id: FlowerId, quantity: u32) {
        if quantity == 0 {
            self.stems.remove(&flower_id);
        } else {
            self.stems.insert(flower_id, quantity);
        }
    }

    pub fn stems(&self) -> impl Iterator<Item = (&FlowerId, u32)> {
        self.stems.iter().map(|(flower_id, quantity)| (flower_id, *quantity))
    }

    /// Total stems across all flowers. Submission is gated on this being positive.
    pub fn stem_count(&self) -> u32 {
        self.stems.values().sum()
    }

    pub fn has_stems(&self) -> bool {
        !self.stems.is_empty()
    }
}
