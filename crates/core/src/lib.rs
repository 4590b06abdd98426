pub mod activity;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fixtures;
pub mod flows;
pub mod pricing;
pub mod session;

pub use activity::{
    ActivityCategory, ActivityEvent, ActivityOutcome, ActivitySink, InMemoryActivitySink,
};
pub use catalog::filter::{FilterSelection, PriceBand};
pub use catalog::sort::SortKey;
pub use catalog::source::{parse_products, read_products_file, CatalogSourceError};
pub use catalog::{query, Catalog};
pub use domain::flower::{Flower, FlowerId, FlowerTable};
pub use domain::order::{DeliveryDetails, Order, OrderLine, OrderStatus, PaymentDetails};
pub use domain::product::{Product, ProductId};
pub use domain::selection::{BouquetSelection, SizeId, StyleId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use flows::engine::{
    CheckoutDefinition, CheckoutEngine, CheckoutTransitionError, StandardCheckout,
};
pub use flows::states::{
    CheckoutAction, CheckoutContext, CheckoutEvent, CheckoutState, TransitionOutcome,
};
pub use pricing::reference::{DiscountTier, ReferenceTables, SizeOption, StyleOption};
pub use pricing::{price_selection, FlowerLineItem, PricingEngine, PricingResult, TieredPricingEngine};
pub use session::{CartItem, CartLine, ShopSession};
