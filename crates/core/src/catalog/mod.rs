pub mod filter;
pub mod sort;
pub mod source;

use crate::domain::product::{Product, ProductId};

use self::filter::FilterSelection;
use self::sort::SortKey;

/// Filters and orders a loaded catalog for display. Filtering is conjunctive
/// across the four facets and disjunctive within one; sorting is stable, so
/// ties keep catalog order. Never mutates the input.
pub fn query(products: &[Product], filters: &FilterSelection, key: SortKey) -> Vec<Product> {
    let mut result: Vec<Product> =
        products.iter().filter(|product| filters.matches(product)).cloned().collect();
    sort::sort_products(&mut result, key);
    result
}

/// A fully loaded product list. Read-only reference data for the session.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn query(&self, filters: &FilterSelection, key: SortKey) -> Vec<Product> {
        query(&self.products, filters, key)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::{Product, ProductId};

    use super::filter::{FilterSelection, PriceBand};
    use super::sort::SortKey;
    use super::{query, Catalog};

    fn product(id: &str, name: &str, price: i64, rating: f64, tags: &[&str], is_new: bool) -> Product {
        Product {
            id: ProductId(id.to_owned()),
            name: name.to_owned(),
            description: String::new(),
            image: String::new(),
            price: Decimal::new(price, 2),
            discounted_price: None,
            rating,
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            is_new,
            is_bestseller: false,
        }
    }

    fn shelf() -> Vec<Product> {
        vec![
            product("b1", "Sunny Delight", 4999, 4.8, &["Sunflowers", "Cheerful"], false),
            product("b2", "Rose Romance", 6999, 5.0, &["Roses", "Romantic"], false),
            product("b3", "Lavender Dreams", 5499, 4.7, &["Lavender", "Purple"], true),
            product("b4", "Rustic Wildflower", 10000, 4.5, &["Wildflowers", "Rustic"], false),
            product("b5", "Luxury Collection", 15999, 5.0, &["Luxury", "Premium"], false),
        ]
    }

    #[test]
    fn empty_filters_return_the_full_catalog() {
        let products = shelf();
        let result = query(&products, &FilterSelection::default(), SortKey::Popularity);
        assert_eq!(result.len(), products.len());
    }

    #[test]
    fn query_leaves_the_input_untouched() {
        let products = shelf();
        let before = products.clone();
        let _ = query(&products, &FilterSelection::default(), SortKey::PriceHigh);
        assert_eq!(products, before);
    }

    #[test]
    fn popularity_sort_is_stable_for_tied_ratings() {
        let products = shelf();
        let result = query(&products, &FilterSelection::default(), SortKey::Popularity);

        // b2 and b5 both rate 5.0; b2 precedes b5 in catalog order.
        assert_eq!(result[0].id, ProductId("b2".to_owned()));
        assert_eq!(result[1].id, ProductId("b5".to_owned()));
        assert_eq!(result[4].id, ProductId("b4".to_owned()));
    }

    #[test]
    fn newest_sort_moves_new_arrivals_first() {
        let result = query(&shelf(), &FilterSelection::default(), SortKey::Newest);
        assert_eq!(result[0].id, ProductId("b3".to_owned()));
    }

    #[test]
    fn price_sorts_use_effective_price() {
        let mut products = shelf();
        // Discount b5 under everything else.
        products[4].discounted_price = Some(Decimal::new(1999, 2));

        let ascending = query(&products, &FilterSelection::default(), SortKey::PriceLow);
        assert_eq!(ascending[0].id, ProductId("b5".to_owned()));

        let descending = query(&products, &FilterSelection::default(), SortKey::PriceHigh);
        assert_eq!(descending[0].id, ProductId("b4".to_owned()));
    }

    #[test]
    fn alphabetical_sort_ignores_case() {
        let mut products = shelf();
        products[0].name = "sunny delight".to_owned();
        let result = query(&products, &FilterSelection::default(), SortKey::Alphabetical);
        let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Lavender Dreams",
                "Luxury Collection",
                "Rose Romance",
                "Rustic Wildflower",
                "sunny delight"
            ]
        );
    }

    #[test]
    fn facet_filters_combine_with_price_bands() {
        let products = shelf();
        let filters = FilterSelection {
            occasions: vec!["romantic".to_owned()],
            price: vec![PriceBand::From50To100],
            ..Default::default()
        };
        let result = query(&products, &filters, SortKey::Popularity);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, ProductId("b2".to_owned()));
    }

    #[test]
    fn hundred_dollar_product_sits_in_the_lower_band() {
        let products = shelf();

        let fifty_to_hundred =
            FilterSelection { price: vec![PriceBand::From50To100], ..Default::default() };
        let result = query(&products, &fifty_to_hundred, SortKey::Popularity);
        assert!(result.iter().any(|p| p.id == ProductId("b4".to_owned())));

        let hundred_to_one_fifty =
            FilterSelection { price: vec![PriceBand::From100To150], ..Default::default() };
        let result = query(&products, &hundred_to_one_fifty, SortKey::Popularity);
        assert!(result.iter().all(|p| p.id != ProductId("b4".to_owned())));
    }

    #[test]
    fn catalog_lookup_finds_by_id() {
        let catalog = Catalog::new(shelf());
        assert_eq!(catalog.len(), 5);
        assert!(catalog.find(&ProductId("b3".to_owned())).is_some());
        assert!(catalog.find(&ProductId("b99".to_owned())).is_none());
    }
}
