pub mod reference;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::flower::{FlowerId, FlowerTable};
use crate::domain::selection::BouquetSelection;

use self::reference::{DiscountTier, ReferenceTables};

/// One resolvable flower line in the breakdown the builder UI renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowerLineItem {
    pub flower_id: FlowerId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub subtotal: Decimal,
    pub discounted_total: Decimal,
    pub line_items: Vec<FlowerLineItem>,
    pub applied_tier: Option<DiscountTier>,
}

impl PricingResult {
    pub fn discount_amount(&self) -> Decimal {
        self.subtotal - self.discounted_total
    }
}

pub trait PricingEngine: Send + Sync {
    fn price(
        &self,
        selection: &BouquetSelection,
        flowers: &FlowerTable,
        tables: &ReferenceTables,
    ) -> PricingResult;
}

#[derive(Default)]
pub struct TieredPricingEngine;

impl PricingEngine for TieredPricingEngine {
    fn price(
        &self,
        selection: &BouquetSelection,
        flowers: &FlowerTable,
        tables: &ReferenceTables,
    ) -> PricingResult {
        price_selection(selection, flowers, tables)
    }
}

/// Prices a custom bouquet. Total over its whole domain: flower ids missing from
/// the table contribute zero, and unknown style/size ids degrade to the
/// `classic`/`medium` entries.
pub fn price_selection(
    selection: &BouquetSelection,
    flowers: &FlowerTable,
    tables: &ReferenceTables,
) -> PricingResult {
    let mut line_items = Vec::new();
    let mut flowers_price = Decimal::ZERO;

    for (flower_id, quantity) in selection.stems() {
        let Some(flower) = flowers.find(flower_id) else {
            continue;
        };
        let line_total = flower.price * Decimal::from(quantity);
        flowers_price += line_total;
        line_items.push(FlowerLineItem {
            flower_id: flower.id.clone(),
            name: flower.name.clone(),
            quantity,
            unit_price: flower.price,
            line_total,
        });
    }

    let (multiplier, size_surcharge) = tables.size_terms(&selection.size);
    let style_surcharge = tables.style_surcharge(&selection.style);
    let vase_surcharge = if selection.vase { tables.vase_surcharge } else { Decimal::ZERO };

    // Multiplication widens the decimal scale (9.98 x 1.5 = 14.970); normalize
    // so totals render and serialize without trailing zeros.
    let subtotal =
        (flowers_price * multiplier + style_surcharge + size_surcharge + vase_surcharge)
            .normalize();
    let applied_tier = tables.applicable_tier(subtotal).cloned();
    let discounted_total = match &applied_tier {
        Some(tier) => (subtotal * tier.pay_rate).normalize(),
        None => subtotal,
    };

    PricingResult { subtotal, discounted_total, line_items, applied_tier }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::flower::{Flower, FlowerId, FlowerTable};
    use crate::domain::selection::{BouquetSelection, SizeId, StyleId};
    use crate::pricing::reference::ReferenceTables;

    use super::{price_selection, PricingEngine, TieredPricingEngine};

    fn flower_table() -> FlowerTable {
        FlowerTable::new(vec![Flower {
            id: FlowerId("f1".to_owned()),
            name: "Red Rose".to_owned(),
            image: String::new(),
            price: Decimal::new(499, 2),
            category: "roses".to_owned(),
            color: "red".to_owned(),
            description: "Classic symbol of love and romance".to_owned(),
        }])
    }

    fn two_roses(style: &str, size: &str, vase: bool) -> BouquetSelection {
        let mut selection =
            BouquetSelection::new(StyleId(style.to_owned()), SizeId(size.to_owned()));
        selection.set_stems(FlowerId("f1".to_owned()), 2);
        selection.vase = vase;
        selection
    }

    #[test]
    fn classic_medium_bouquet_below_discount_floor() {
        let result =
            price_selection(&two_roses("classic", "medium", false), &flower_table(), &ReferenceTables::default());

        // 4.99 * 2 = 9.98 flowers, x1 medium, +10 medium flat, +0 style, no vase.
        assert_eq!(result.subtotal, Decimal::new(1998, 2));
        assert_eq!(result.discounted_total, Decimal::new(1998, 2));
        assert!(result.applied_tier.is_none());
        assert_eq!(result.line_items.len(), 1);
        assert_eq!(result.line_items[0].line_total, Decimal::new(998, 2));
    }

    #[test]
    fn cascade_large_with_vase_lands_in_five_percent_tier() {
        let result =
            price_selection(&two_roses("cascade", "large", true), &flower_table(), &ReferenceTables::default());

        // 9.98 x 1.5 = 14.97, +10 style, +20 size, +15 vase = 59.97.
        assert_eq!(result.subtotal, Decimal::new(5997, 2));
        assert_eq!(result.discounted_total, Decimal::new(569715, 4));
        assert_eq!(result.applied_tier.map(|t| t.pay_rate), Some(Decimal::new(95, 2)));
    }

    #[test]
    fn empty_selection_prices_only_the_fixed_surcharges() {
        let mut selection =
            BouquetSelection::new(StyleId("modern".to_owned()), SizeId("medium".to_owned()));
        selection.vase = true;
        let result = price_selection(&selection, &flower_table(), &ReferenceTables::default());

        // +5 style, +10 size, +15 vase, no flowers.
        assert_eq!(result.subtotal, Decimal::from(30));
        assert_eq!(result.discounted_total, Decimal::from(30));
        assert!(result.line_items.is_empty());
    }

    #[test]
    fn unknown_flower_ids_contribute_zero() {
        let mut selection = two_roses("classic", "medium", false);
        selection.set_stems(FlowerId("no-such-flower".to_owned()), 10);
        let result = price_selection(&selection, &flower_table(), &ReferenceTables::default());

        assert_eq!(result.subtotal, Decimal::new(1998, 2));
        assert_eq!(result.line_items.len(), 1);
    }

    #[test]
    fn unknown_style_and_size_degrade_to_defaults() {
        let result =
            price_selection(&two_roses("baroque", "colossal", false), &flower_table(), &ReferenceTables::default());

        // Same as classic/medium: 9.98 + 10.
        assert_eq!(result.subtotal, Decimal::new(1998, 2));
    }

    #[test]
    fn discounted_total_never_exceeds_subtotal() {
        let tables = ReferenceTables::default();
        let flowers = flower_table();
        for stems in [1_u32, 8, 15, 40] {
            let mut selection = BouquetSelection::default();
            selection.set_stems(FlowerId("f1".to_owned()), stems);
            let result = price_selection(&selection, &flowers, &tables);
            assert!(result.discounted_total <= result.subtotal);
            let below_floor = result.subtotal < Decimal::from(50);
            assert_eq!(result.discounted_total == result.subtotal, below_floor);
        }
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        let tables = ReferenceTables::default();
        let flowers = FlowerTable::new(vec![Flower {
            id: FlowerId("unit".to_owned()),
            name: "Unit Stem".to_owned(),
            image: String::new(),
            price: Decimal::ONE,
            category: "test".to_owned(),
            color: "white".to_owned(),
            description: String::new(),
        }]);

        // 40 stems + 10 medium flat = exactly 50.
        let mut at_fifty = BouquetSelection::default();
        at_fifty.set_stems(FlowerId("unit".to_owned()), 40);
        let result = price_selection(&at_fifty, &flowers, &tables);
        assert_eq!(result.subtotal, Decimal::from(50));
        assert_eq!(result.discounted_total, Decimal::new(475, 1));

        // 90 stems + 10 = exactly 100 pays 90%.
        let mut at_hundred = BouquetSelection::default();
        at_hundred.set_stems(FlowerId("unit".to_owned()), 90);
        let result = price_selection(&at_hundred, &flowers, &tables);
        assert_eq!(result.subtotal, Decimal::from(100));
        assert_eq!(result.discounted_total, Decimal::from(90));

        // 140 stems + 10 = exactly 150 pays 85%.
        let mut at_one_fifty = BouquetSelection::default();
        at_one_fifty.set_stems(FlowerId("unit".to_owned()), 140);
        let result = price_selection(&at_one_fifty, &flowers, &tables);
        assert_eq!(result.subtotal, Decimal::from(150));
        assert_eq!(result.discounted_total, Decimal::new(1275, 1));
    }

    #[test]
    fn engine_trait_matches_free_function() {
        let engine = TieredPricingEngine;
        let selection = two_roses("cascade", "large", true);
        let flowers = flower_table();
        let tables = ReferenceTables::default();

        assert_eq!(
            engine.price(&selection, &flowers, &tables),
            price_selection(&selection, &flowers, &tables)
        );
    }
}
