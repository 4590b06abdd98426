use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use fleur_cli::commands::price::{PriceArgs, StemArg};
use fleur_cli::commands::shop::ShopArgs;
use fleur_cli::commands::{config, doctor, price, shop};
use serde_json::Value;

#[test]
fn shop_demo_lists_the_full_catalog_by_rating() {
    with_env(&[], || {
        let args = ShopArgs { demo: true, json: true, ..Default::default() };
        let result = shop::run(&args);
        assert_eq!(result.exit_code, 0, "expected successful demo listing");

        let listing = parse_payload(&result.output);
        let products = listing.as_array().expect("listing should be a JSON array");
        assert_eq!(products.len(), 12);

        let first = products[0]["rating"].as_f64().expect("rating should be a number");
        let last = products[11]["rating"].as_f64().expect("rating should be a number");
        assert!(first >= last, "popularity sort must be descending by rating");
    });
}

#[test]
fn shop_price_band_filter_narrows_the_listing() {
    with_env(&[], || {
        let args = ShopArgs {
            demo: true,
            json: true,
            price: vec!["under-50".parse().expect("valid band")],
            ..Default::default()
        };
        let result = shop::run(&args);
        assert_eq!(result.exit_code, 0);

        let listing = parse_payload(&result.output);
        let products = listing.as_array().expect("listing should be a JSON array");
        assert_eq!(products.len(), 4, "four demo bouquets cost under 50 effectively");
    });
}

#[test]
fn shop_reports_unreachable_sources_as_catalog_errors() {
    with_env(&[], || {
        let args = ShopArgs {
            url: Some("http://127.0.0.1:1/get-products".to_owned()),
            json: true,
            ..Default::default()
        };
        let result = shop::run(&args);
        assert_eq!(result.exit_code, 5, "expected catalog source failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "shop");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "catalog_source");
    });
}

#[test]
fn price_matches_the_worked_examples() {
    with_env(&[], || {
        let args = PriceArgs {
            stems: vec![StemArg { flower_id: "f1".to_owned(), quantity: 2 }],
            style: "classic".to_owned(),
            size: "medium".to_owned(),
            json: true,
            ..Default::default()
        };
        let result = price::run(&args);
        assert_eq!(result.exit_code, 0, "expected successful pricing");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["subtotal"], "19.98");
        assert_eq!(payload["discounted_total"], "19.98");
        assert!(payload["applied_tier"].is_null());

        let args = PriceArgs {
            stems: vec![StemArg { flower_id: "f1".to_owned(), quantity: 2 }],
            style: "cascade".to_owned(),
            size: "large".to_owned(),
            vase: true,
            json: true,
        };
        let result = price::run(&args);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["subtotal"], "59.97");
        assert_eq!(payload["discounted_total"], "56.9715");
        assert_eq!(payload["applied_tier"]["pay_rate"], "0.95");
    });
}

#[test]
fn price_rejects_an_empty_selection() {
    with_env(&[], || {
        let result = price::run(&PriceArgs::default());
        assert_eq!(result.exit_code, 3, "expected empty selection failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "price");
        assert_eq!(payload["error_class"], "empty_selection");
    });
}

#[test]
fn config_reports_env_source_attribution() {
    with_env(&[("FLEUR_CATALOG_SOURCE_URL", "http://catalog.internal/get-products")], || {
        let output = config::run();
        assert!(output.contains("catalog.source_url = http://catalog.internal/get-products"));
        assert!(output.contains("env (FLEUR_CATALOG_SOURCE_URL)"));
        assert!(output.contains("pricing.discount_tiers = 3 tiers"));
    });
}

#[test]
fn doctor_passes_with_a_readable_file_source() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"[
            {"id": "b1", "name": "Sunny Delight", "price": 59.99, "discountedPrice": 49.99, "rating": 4.8, "tags": ["Sunflowers"], "isNew": false, "isBestseller": true},
            {"id": "b2", "name": "Rose Romance", "price": 69.99, "discountedPrice": null, "rating": 5.0, "tags": ["Roses"], "isNew": false, "isBestseller": true}
        ]"#,
    )
    .expect("write catalog fixture");

    let path_value = path.display().to_string();
    with_env(&[("FLEUR_CATALOG_SOURCE_PATH", path_value.as_str())], || {
        let output = doctor::run(true);
        let report = parse_payload(&output);
        assert_eq!(report["overall_status"], "pass");

        let checks = report["checks"].as_array().expect("checks should be an array");
        assert!(checks
            .iter()
            .any(|check| check["name"] == "catalog_source" && check["status"] == "pass"));
        assert!(checks
            .iter()
            .any(|check| check["name"] == "pricing_reference" && check["status"] == "pass"));
    });
}

#[test]
fn doctor_fails_when_config_is_invalid() {
    with_env(&[("FLEUR_CATALOG_SOURCE_URL", "ftp://catalog/get-products")], || {
        let output = doctor::run(true);
        let report = parse_payload(&output);
        assert_eq!(report["overall_status"], "fail");

        let checks = report["checks"].as_array().expect("checks should be an array");
        assert!(checks
            .iter()
            .any(|check| check["name"] == "config_validation" && check["status"] == "fail"));
        assert!(checks
            .iter()
            .any(|check| check["name"] == "catalog_source" && check["status"] == "skipped"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "FLEUR_CATALOG_SOURCE_URL",
        "FLEUR_CATALOG_SOURCE_PATH",
        "FLEUR_CATALOG_REQUEST_TIMEOUT_SECS",
        "FLEUR_LOGGING_LEVEL",
        "FLEUR_LOGGING_FORMAT",
        "FLEUR_LOG_LEVEL",
        "FLEUR_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
