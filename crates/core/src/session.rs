//! The one place interaction state lives. The catalog, flower table, and
//! reference tables come in as immutable inputs; cart, wishlist, and active
//! filters are owned here; everything the UI renders (visible products, totals)
//! is recomputed on demand rather than cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::activity::{
    ActivityCategory, ActivityEvent, ActivityOutcome, ActivitySink, InMemoryActivitySink,
};
use crate::catalog::filter::FilterSelection;
use crate::catalog::sort::SortKey;
use crate::catalog::Catalog;
use crate::domain::flower::FlowerTable;
use crate::domain::order::{DeliveryDetails, Order, OrderLine, OrderStatus};
use crate::domain::product::{Product, ProductId};
use crate::domain::selection::BouquetSelection;
use crate::errors::DomainError;
use crate::flows::engine::CheckoutTransitionError;
use crate::flows::states::{CheckoutContext, CheckoutState};
use crate::pricing::reference::ReferenceTables;
use crate::pricing::{price_selection, PricingResult};

/// A cart entry: either a shelf bouquet or a custom build priced at add time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CartItem {
    Listed(Product),
    Custom { selection: BouquetSelection, pricing: PricingResult },
}

impl CartItem {
    pub fn unit_price(&self) -> Decimal {
        match self {
            Self::Listed(product) => product.effective_price(),
            Self::Custom { pricing, .. } => pricing.discounted_total,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::Listed(product) => product.name.clone(),
            Self::Custom { selection, .. } => {
                format!("Custom bouquet ({} stems)", selection.stem_count())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: CartItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.item.unit_price() * Decimal::from(self.quantity)
    }
}

pub struct ShopSession {
    catalog: Catalog,
    flowers: FlowerTable,
    tables: ReferenceTables,
    cart: Vec<CartLine>,
    wishlist: Vec<ProductId>,
    filters: FilterSelection,
    sort: SortKey,
    activity: InMemoryActivitySink,
}

impl ShopSession {
    pub fn new(catalog: Catalog, flowers: FlowerTable, tables: ReferenceTables) -> Self {
        Self {
            catalog,
            flowers,
            tables,
            cart: Vec::new(),
            wishlist: Vec::new(),
            filters: FilterSelection::default(),
            sort: SortKey::default(),
            activity: InMemoryActivitySink::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn flowers(&self) -> &FlowerTable {
        &self.flowers
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// The listing as the shop page should render it right now.
    pub fn visible_products(&self) -> Vec<Product> {
        self.catalog.query(&self.filters, self.sort)
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_filters(&mut self, filters: FilterSelection) {
        self.filters = filters;
        self.activity.emit(
            ActivityEvent::new(
                "catalog.filters_changed",
                ActivityCategory::Catalog,
                ActivityOutcome::Success,
            )
            .with_metadata("matching", self.visible_products().len().to_string()),
        );
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(FilterSelection::default());
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Adds one of a shelf bouquet, merging into an existing line.
    pub fn add_listed(&mut self, product_id: &ProductId) -> Result<(), DomainError> {
        let Some(product) = self.catalog.find(product_id).cloned() else {
            return Err(DomainError::UnknownProduct(product_id.clone()));
        };

        if let Some(line) = self.cart.iter_mut().find(
            |line| matches!(&line.item, CartItem::Listed(existing) if &existing.id == product_id),
        ) {
            line.quantity += 1;
        } else {
            self.cart.push(CartLine { item: CartItem::Listed(product.clone()), quantity: 1 });
        }

        self.activity.emit(
            ActivityEvent::new("cart.item_added", ActivityCategory::Cart, ActivityOutcome::Success)
                .with_metadata("product", product.name)
                .with_metadata("unit_price", product.price.to_string()),
        );
        Ok(())
    }

    /// Prices the custom build and adds it as its own line. Empty builds are
    /// rejected, mirroring the builder's disabled submit button.
    pub fn add_custom(&mut self, selection: BouquetSelection) -> Result<PricingResult, DomainError> {
        if !selection.has_stems() {
            self.activity.emit(ActivityEvent::new(
                "cart.custom_rejected",
                ActivityCategory::Cart,
                ActivityOutcome::Rejected,
            ));
            return Err(DomainError::EmptyBouquet);
        }

        let pricing = price_selection(&selection, &self.flowers, &self.tables);
        self.activity.emit(
            ActivityEvent::new("cart.item_added", ActivityCategory::Cart, ActivityOutcome::Success)
                .with_metadata("product", format!("custom ({} stems)", selection.stem_count()))
                .with_metadata("unit_price", pricing.discounted_total.to_string()),
        );
        self.cart
            .push(CartLine { item: CartItem::Custom { selection, pricing: pricing.clone() }, quantity: 1 });
        Ok(pricing)
    }

    /// Sets an absolute quantity for a listed line; zero removes the line.
    pub fn set_listed_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), DomainError> {
        let position = self
            .cart
            .iter()
            .position(
                |line| matches!(&line.item, CartItem::Listed(existing) if &existing.id == product_id),
            )
            .ok_or_else(|| DomainError::CartItemNotFound(product_id.clone()))?;

        if quantity == 0 {
            self.cart.remove(position);
            self.activity.emit(
                ActivityEvent::new(
                    "cart.item_removed",
                    ActivityCategory::Cart,
                    ActivityOutcome::Success,
                )
                .with_metadata("product", product_id.to_string()),
            );
        } else {
            self.cart[position].quantity = quantity;
            self.activity.emit(
                ActivityEvent::new(
                    "cart.quantity_updated",
                    ActivityCategory::Cart,
                    ActivityOutcome::Success,
                )
                .with_metadata("product", product_id.to_string())
                .with_metadata("quantity", quantity.to_string()),
            );
        }
        Ok(())
    }

    pub fn remove_listed(&mut self, product_id: &ProductId) -> Result<(), DomainError> {
        self.set_listed_quantity(product_id, 0)
    }

    /// Returns whether the product is wishlisted after the toggle.
    pub fn toggle_wishlist(&mut self, product_id: &ProductId) -> Result<bool, DomainError> {
        if self.catalog.find(product_id).is_none() {
            return Err(DomainError::UnknownProduct(product_id.clone()));
        }

        let wishlisted = if let Some(position) =
            self.wishlist.iter().position(|existing| existing == product_id)
        {
            self.wishlist.remove(position);
            false
        } else {
            self.wishlist.push(product_id.clone());
            true
        };

        self.activity.emit(
            ActivityEvent::new(
                "wishlist.toggled",
                ActivityCategory::Wishlist,
                ActivityOutcome::Success,
            )
            .with_metadata("product", product_id.to_string())
            .with_metadata("wishlisted", wishlisted.to_string()),
        );
        Ok(wishlisted)
    }

    pub fn cart_lines(&self) -> &[CartLine] {
        &self.cart
    }

    pub fn wishlist(&self) -> &[ProductId] {
        &self.wishlist
    }

    pub fn cart_item_count(&self) -> u32 {
        self.cart.iter().map(|line| line.quantity).sum()
    }

    pub fn cart_subtotal(&self) -> Decimal {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    /// Guard facts for the checkout engine, derived from current state.
    pub fn checkout_context(&self, missing_required_fields: Vec<String>) -> CheckoutContext {
        CheckoutContext { cart_is_empty: self.cart.is_empty(), missing_required_fields }
    }

    /// Turns the cart into an order and empties it. Guarded the same way the
    /// wizard is: a non-empty cart and complete delivery details.
    pub fn place_order(&mut self, delivery: DeliveryDetails) -> Result<Order, DomainError> {
        if self.cart.is_empty() {
            return Err(CheckoutTransitionError::EmptyCart { state: CheckoutState::Cart }.into());
        }
        let missing = delivery.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutTransitionError::MissingRequiredFields {
                state: CheckoutState::Delivery,
                missing_fields: missing,
            }
            .into());
        }

        let lines: Vec<OrderLine> = self
            .cart
            .iter()
            .map(|line| OrderLine {
                name: line.item.display_name(),
                quantity: line.quantity,
                unit_price: line.item.unit_price(),
                line_total: line.line_total(),
            })
            .collect();
        let total = self.cart_subtotal();
        let reference = order_reference();

        self.cart.clear();
        self.activity.emit(
            ActivityEvent::new("order.placed", ActivityCategory::Order, ActivityOutcome::Success)
                .with_metadata("reference", reference.clone())
                .with_metadata("total", total.to_string()),
        );

        Ok(Order {
            reference,
            lines,
            total,
            delivery,
            placed_at: chrono::Utc::now(),
            status: OrderStatus::Confirmed,
        })
    }

    /// The notification feed the UI renders instead of alert popups.
    pub fn activity(&self) -> Vec<ActivityEvent> {
        self.activity.events()
    }
}

fn order_reference() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("FL-{}", id[..8].to_uppercase())
}
