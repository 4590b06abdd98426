use serde::{Deserialize, Serialize};

/// Wizard steps of the checkout. `Confirmation` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutState {
    Cart,
    Delivery,
    Payment,
    Confirmation,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutEvent {
    CartConfirmed,
    DeliverySubmitted,
    PaymentSubmitted,
    BackRequested,
    CancelRequested,
}

/// Facts the guards need, supplied fresh by the caller on every transition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutContext {
    pub cart_is_empty: bool,
    pub missing_required_fields: Vec<String>,
}

/// Side effects the caller performs after a transition is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutAction {
    CollectDeliveryDetails,
    CollectPaymentDetails,
    PlaceOrder,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub from: CheckoutState,
    pub to: CheckoutState,
    pub event: CheckoutEvent,
    pub actions: Vec<CheckoutAction>,
}
