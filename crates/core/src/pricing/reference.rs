use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::selection::{SizeId, StyleId};

/// Fallback entries when a selection carries an id the tables do not know.
/// Unresolvable references degrade to these instead of failing.
pub const FALLBACK_STYLE: &str = "classic";
pub const FALLBACK_SIZE: &str = "medium";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleOption {
    pub id: StyleId,
    pub name: String,
    pub surcharge: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeOption {
    pub id: SizeId,
    pub name: String,
    pub surcharge: Decimal,
    /// Applied to the flower cost only; style and vase surcharges stay flat.
    pub multiplier: Decimal,
}

/// One band of the subtotal-dependent discount. `pay_rate` is the fraction of
/// the subtotal actually paid (0.85 means 15% off).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub threshold: Decimal,
    pub pay_rate: Decimal,
}

impl DiscountTier {
    pub fn percent_off(&self) -> Decimal {
        ((Decimal::ONE - self.pay_rate) * Decimal::from(100)).normalize()
    }
}

/// Static configuration the pricing engine consumes: arrangement styles, sizes,
/// the vase surcharge, and the discount ladder.
///
/// `discount_tiers` is kept in descending-threshold order; config validation
/// enforces this, and `applicable_tier` relies on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub styles: Vec<StyleOption>,
    pub sizes: Vec<SizeOption>,
    pub vase_surcharge: Decimal,
    pub discount_tiers: Vec<DiscountTier>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self {
            styles: vec![
                style("classic", "Classic Round", Decimal::ZERO),
                style("modern", "Modern Asymmetric", Decimal::from(5)),
                style("rustic", "Rustic Garden", Decimal::from(7)),
                style("cascade", "Cascading", Decimal::from(10)),
            ],
            sizes: vec![
                size("small", "Small", Decimal::ZERO, Decimal::new(7, 1)),
                size("medium", "Medium", Decimal::from(10), Decimal::ONE),
                size("large", "Large", Decimal::from(20), Decimal::new(15, 1)),
            ],
            vase_surcharge: Decimal::from(15),
            discount_tiers: vec![
                DiscountTier { threshold: Decimal::from(150), pay_rate: Decimal::new(85, 2) },
                DiscountTier { threshold: Decimal::from(100), pay_rate: Decimal::new(90, 2) },
                DiscountTier { threshold: Decimal::from(50), pay_rate: Decimal::new(95, 2) },
            ],
        }
    }
}

impl ReferenceTables {
    pub fn style_for(&self, style_id: &StyleId) -> Option<&StyleOption> {
        self.styles.iter().find(|style| &style.id == style_id)
    }

    pub fn size_for(&self, size_id: &SizeId) -> Option<&SizeOption> {
        self.sizes.iter().find(|size| &size.id == size_id)
    }

    /// Flat style surcharge; unknown ids resolve to the `classic` entry, and a
    /// table without one charges nothing.
    pub fn style_surcharge(&self, style_id: &StyleId) -> Decimal {
        self.style_for(style_id)
            .or_else(|| self.styles.iter().find(|style| style.id.0 == FALLBACK_STYLE))
            .map(|style| style.surcharge)
            .unwrap_or(Decimal::ZERO)
    }

    /// `(multiplier, flat surcharge)` for a size; unknown ids resolve to the
    /// `medium` entry, and a table without one multiplies by one and adds nothing.
    pub fn size_terms(&self, size_id: &SizeId) -> (Decimal, Decimal) {
        self.size_for(size_id)
            .or_else(|| self.sizes.iter().find(|size| size.id.0 == FALLBACK_SIZE))
            .map(|size| (size.multiplier, size.surcharge))
            .unwrap_or((Decimal::ONE, Decimal::ZERO))
    }

    /// First tier the subtotal reaches, scanning the descending ladder. Bands are
    /// mutually exclusive by construction, so first match wins.
    pub fn applicable_tier(&self, subtotal: Decimal) -> Option<&DiscountTier> {
        self.discount_tiers.iter().find(|tier| subtotal >= tier.threshold)
    }
}

fn style(id: &str, name: &str, surcharge: Decimal) -> StyleOption {
    StyleOption { id: StyleId(id.to_owned()), name: name.to_owned(), surcharge }
}

fn size(id: &str, name: &str, surcharge: Decimal, multiplier: Decimal) -> SizeOption {
    SizeOption { id: SizeId(id.to_owned()), name: name.to_owned(), surcharge, multiplier }
}
