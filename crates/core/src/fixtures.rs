//! Deterministic demo data: the shop's stock bouquet shelf and the builder's
//! per-stem flower table. Used by the CLI demo source and by tests.

use rust_decimal::Decimal;

use crate::domain::flower::{Flower, FlowerId};
use crate::domain::product::{Product, ProductId};

pub fn demo_catalog() -> Vec<Product> {
    vec![
        product(
            "b1",
            "Sunny Delight",
            "A vibrant mix of sunflowers, yellow roses, and daisies to brighten any day.",
            5999,
            Some(4999),
            4.8,
            &["Sunflowers", "Cheerful", "Bright"],
            false,
            true,
        ),
        product(
            "b2",
            "Rose Romance",
            "Classic arrangement of premium red roses, perfect for expressing love and affection.",
            6999,
            None,
            5.0,
            &["Roses", "Romantic", "Classic"],
            false,
            true,
        ),
        product(
            "b3",
            "Lavender Dreams",
            "Soothing bouquet of lavender, purple roses, and lilacs with eucalyptus accents.",
            6499,
            Some(5499),
            4.7,
            &["Lavender", "Purple", "Elegant"],
            true,
            false,
        ),
        product(
            "b4",
            "Rustic Wildflower",
            "Natural arrangement of seasonal wildflowers in a rustic style with leafy greens.",
            4999,
            None,
            4.5,
            &["Wildflowers", "Rustic", "Natural"],
            false,
            false,
        ),
        product(
            "b5",
            "Pink Perfection",
            "Delicate arrangement of pink roses, peonies, and carnations in a medium bouquet.",
            5999,
            None,
            4.9,
            &["Pink", "Peonies", "Soft"],
            false,
            true,
        ),
        product(
            "b6",
            "Tropical Paradise",
            "Exotic birds of paradise, orchids, and tropical greens in a vibrant display.",
            7999,
            Some(6999),
            4.6,
            &["Tropical", "Exotic", "Colorful"],
            true,
            false,
        ),
        product(
            "b7",
            "White Elegance",
            "Pure white roses, lilies, and hydrangeas for a sophisticated and timeless look.",
            6999,
            None,
            4.8,
            &["White", "Elegant", "Sophisticated"],
            false,
            false,
        ),
        product(
            "b8",
            "Autumn Harvest",
            "Warm orange and red blooms with seasonal fall accents and textures.",
            5499,
            Some(4999),
            4.7,
            &["Autumn", "Orange", "Seasonal"],
            false,
            false,
        ),
        product(
            "b9",
            "Sweet Pastels",
            "Soft pastel mix of roses, lisianthus, and ranunculus for a gentle and romantic feel.",
            5999,
            None,
            4.9,
            &["Pastel", "Soft", "Sweet"],
            true,
            false,
        ),
        product(
            "b10",
            "Bold & Beautiful",
            "Striking arrangement of red and purple blooms with dramatic greenery.",
            7499,
            Some(6499),
            4.8,
            &["Bold", "Dramatic", "Colorful"],
            false,
            true,
        ),
        product(
            "b11",
            "Petite Posy",
            "Small, delicate arrangement perfect for desks or small spaces.",
            3499,
            None,
            4.5,
            &["Small", "Cute", "Affordable"],
            false,
            false,
        ),
        product(
            "b12",
            "Luxury Collection",
            "Premium roses, peonies, and exotic blooms in an opulent arrangement.",
            11999,
            Some(9999),
            5.0,
            &["Luxury", "Premium", "Special"],
            false,
            false,
        ),
    ]
}

pub fn demo_flowers() -> Vec<Flower> {
    vec![
        flower("f1", "Red Rose", 499, "roses", "red", "Classic symbol of love and romance"),
        flower("f2", "Pink Rose", 499, "roses", "pink", "Represents gratitude and admiration"),
        flower("f3", "White Rose", 499, "roses", "white", "Symbol of purity and innocence"),
        flower("f4", "Sunflower", 399, "seasonal", "yellow", "Bright and cheerful with large blooms"),
        flower("f5", "White Lily", 599, "lilies", "white", "Elegant and sophisticated"),
        flower("f6", "Purple Tulip", 299, "tulips", "purple", "Symbol of royalty and elegance"),
        flower("f7", "Pink Peony", 699, "premium", "pink", "Lush and romantic with full blooms"),
        flower("f8", "White Daisy", 199, "daisies", "white", "Simple and sweet"),
        flower("f9", "Blue Hydrangea", 549, "hydrangeas", "blue", "Full, lush blooms in vibrant blue"),
        flower("f10", "Purple Orchid", 899, "premium", "purple", "Exotic and long-lasting"),
        flower("f11", "Yellow Daffodil", 249, "spring", "yellow", "Bright harbinger of spring"),
        flower("f12", "Red Carnation", 299, "carnations", "red", "Long-lasting and versatile"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    discounted_cents: Option<i64>,
    rating: f64,
    tags: &[&str],
    is_new: bool,
    is_bestseller: bool,
) -> Product {
    Product {
        id: ProductId(id.to_owned()),
        name: name.to_owned(),
        description: description.to_owned(),
        image: format!("https://images.fleur.example/bouquets/{id}.jpg"),
        price: Decimal::new(price_cents, 2),
        discounted_price: discounted_cents.map(|cents| Decimal::new(cents, 2)),
        rating,
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        is_new,
        is_bestseller,
    }
}

fn flower(
    id: &str,
    name: &str,
    price_cents: i64,
    category: &str,
    color: &str,
    description: &str,
) -> Flower {
    Flower {
        id: FlowerId(id.to_owned()),
        name: name.to_owned(),
        image: format!("https://images.fleur.example/flowers/{id}.jpg"),
        price: Decimal::new(price_cents, 2),
        category: category.to_owned(),
        color: color.to_owned(),
        description: description.to_owned(),
    }
}
