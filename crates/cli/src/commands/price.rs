use std::str::FromStr;

use clap::Args;
use fleur_core::config::{AppConfig, LoadOptions};
use fleur_core::domain::flower::{FlowerId, FlowerTable};
use fleur_core::domain::selection::{BouquetSelection, SizeId, StyleId};
use fleur_core::fixtures;
use fleur_core::pricing::{price_selection, PricingResult};
use fleur_core::pricing::reference::ReferenceTables;
use thiserror::Error;

use crate::commands::CommandResult;

/// One `--stem id=qty` argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StemArg {
    pub flower_id: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid stem argument `{0}` (expected <flower-id>=<quantity>)")]
pub struct ParseStemError(String);

impl FromStr for StemArg {
    type Err = ParseStemError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (flower_id, quantity) =
            value.split_once('=').ok_or_else(|| ParseStemError(value.to_owned()))?;
        let quantity =
            quantity.trim().parse::<u32>().map_err(|_| ParseStemError(value.to_owned()))?;
        if flower_id.trim().is_empty() {
            return Err(ParseStemError(value.to_owned()));
        }
        Ok(Self { flower_id: flower_id.trim().to_owned(), quantity })
    }
}

#[derive(Args, Debug, Default)]
pub struct PriceArgs {
    #[arg(long = "stem", help = "Stem selection as <flower-id>=<quantity> (repeatable)")]
    pub stems: Vec<StemArg>,
    #[arg(long, default_value = "classic", help = "Arrangement style id")]
    pub style: String,
    #[arg(long, default_value = "medium", help = "Bouquet size id")]
    pub size: String,
    #[arg(long, help = "Add the glass vase")]
    pub vase: bool,
    #[arg(long, help = "Emit the pricing result as JSON")]
    pub json: bool,
}

pub fn run(args: &PriceArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("price", "config_validation", error.to_string(), 2)
        }
    };

    let mut selection =
        BouquetSelection::new(StyleId(args.style.clone()), SizeId(args.size.clone()));
    selection.vase = args.vase;
    for stem in &args.stems {
        selection.set_stems(FlowerId(stem.flower_id.clone()), stem.quantity);
    }

    if !selection.has_stems() {
        return CommandResult::failure(
            "price",
            "empty_selection",
            "select at least one stem (repeat --stem <flower-id>=<quantity>)",
            3,
        );
    }

    let flowers = FlowerTable::new(fixtures::demo_flowers());
    let result = price_selection(&selection, &flowers, &config.pricing);
    tracing::debug!(
        stems = selection.stem_count(),
        subtotal = %result.subtotal,
        total = %result.discounted_total,
        "priced custom bouquet"
    );

    if args.json {
        let output = serde_json::to_string_pretty(&result)
            .unwrap_or_else(|error| format!("{{}} // serialization failed: {error}"));
        return CommandResult { exit_code: 0, output };
    }

    CommandResult {
        exit_code: 0,
        output: render_breakdown(&selection, &result, &config.pricing),
    }
}

fn render_breakdown(
    selection: &BouquetSelection,
    result: &PricingResult,
    tables: &ReferenceTables,
) -> String {
    let mut lines = Vec::new();

    for item in &result.line_items {
        lines.push(format!(
            "- {} x {} @ ${} = ${}",
            item.name, item.quantity, item.unit_price, item.line_total
        ));
    }

    if let Some(size) = tables.size_for(&selection.size) {
        lines.push(format!("size: {} (x{}, +${})", size.name, size.multiplier, size.surcharge));
    }
    if let Some(style) = tables.style_for(&selection.style) {
        lines.push(format!("style: {} (+${})", style.name, style.surcharge));
    }
    if selection.vase {
        lines.push(format!("vase: +${}", tables.vase_surcharge));
    }

    lines.push(format!("subtotal: ${}", result.subtotal));
    match &result.applied_tier {
        Some(tier) => {
            lines.push(format!(
                "discount: {}% off (-${})",
                tier.percent_off(),
                result.discount_amount()
            ));
            lines.push(format!("total: ${}", result.discounted_total));
        }
        None => lines.push(format!("total: ${}", result.discounted_total)),
    }

    lines.join("\n")
}
