use std::path::PathBuf;

use clap::Args;
use fleur_core::catalog;
use fleur_core::catalog::filter::{FilterSelection, PriceBand};
use fleur_core::catalog::sort::SortKey;
use fleur_core::config::{AppConfig, LoadOptions};
use fleur_core::domain::product::Product;
use fleur_core::errors::ApplicationError;

use crate::commands::CommandResult;
use crate::source::{load_products, SourceSpec};

#[derive(Args, Debug, Default)]
pub struct ShopArgs {
    #[arg(long, help = "Fetch the catalog from this URL instead of the configured source")]
    pub url: Option<String>,
    #[arg(long, help = "Read the catalog from a JSON file")]
    pub file: Option<PathBuf>,
    #[arg(long, help = "Use the built-in demo catalog")]
    pub demo: bool,
    #[arg(long = "occasion", help = "Occasion keyword filter (repeatable)")]
    pub occasions: Vec<String>,
    #[arg(long = "flower", help = "Flower type keyword filter (repeatable)")]
    pub flowers: Vec<String>,
    #[arg(long = "color", help = "Color keyword filter (repeatable)")]
    pub colors: Vec<String>,
    #[arg(
        long = "price",
        help = "Price band filter: under-50|50-100|100-150|over-150 (repeatable)"
    )]
    pub price: Vec<PriceBand>,
    #[arg(
        long,
        default_value = "popularity",
        help = "Sort key: popularity|newest|price-low|price-high|alphabetical"
    )]
    pub sort: SortKey,
    #[arg(long, help = "Emit the filtered listing as JSON")]
    pub json: bool,
}

pub fn run(args: &ShopArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("shop", "config_validation", error.to_string(), 2)
        }
    };

    let spec = SourceSpec::resolve(args.url.clone(), args.file.clone(), args.demo, &config.catalog);
    let products = match load_products(&spec, config.catalog.request_timeout_secs) {
        Ok(products) => products,
        Err(error) => {
            let interface =
                ApplicationError::CatalogSource(error.to_string()).into_interface("cli");
            return CommandResult::failure(
                "shop",
                "catalog_source",
                format!("{} ({error})", interface.user_message()),
                5,
            );
        }
    };

    let filters = FilterSelection {
        occasions: args.occasions.clone(),
        flowers: args.flowers.clone(),
        colors: args.colors.clone(),
        price: args.price.clone(),
    };
    let listing = catalog::query(&products, &filters, args.sort);
    tracing::debug!(
        loaded = products.len(),
        matching = listing.len(),
        sort = args.sort.id(),
        "catalog query complete"
    );

    if args.json {
        let output = serde_json::to_string_pretty(&listing)
            .unwrap_or_else(|error| format!("[] // serialization failed: {error}"));
        return CommandResult { exit_code: 0, output };
    }

    CommandResult { exit_code: 0, output: render_listing(&listing, products.len(), &spec) }
}

fn render_listing(listing: &[Product], loaded: usize, spec: &SourceSpec) -> String {
    let mut lines =
        vec![format!("showing {} of {} bouquets ({})", listing.len(), loaded, spec.describe())];

    if listing.is_empty() {
        lines.push("no bouquets match the active filters".to_string());
        return lines.join("\n");
    }

    for product in listing {
        let price = match product.discounted_price {
            Some(discounted) => format!("${discounted} (was ${})", product.price),
            None => format!("${}", product.price),
        };
        let mut badges = Vec::new();
        if product.is_new {
            badges.push("new");
        }
        if product.is_bestseller {
            badges.push("bestseller");
        }
        let badge_suffix =
            if badges.is_empty() { String::new() } else { format!("  [{}]", badges.join(", ")) };

        lines.push(format!(
            "- {:<20} {}  rating {:.1}{}",
            product.name, price, product.rating, badge_suffix
        ));
    }

    lines.join("\n")
}
