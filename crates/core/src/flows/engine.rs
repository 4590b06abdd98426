use thiserror::Error;

use crate::activity::{ActivityCategory, ActivityEvent, ActivityOutcome, ActivitySink};
use crate::flows::states::{
    CheckoutAction, CheckoutContext, CheckoutEvent, CheckoutState, TransitionOutcome,
};

pub trait CheckoutDefinition {
    fn initial_state(&self) -> CheckoutState;
    fn transition(
        &self,
        current: &CheckoutState,
        event: &CheckoutEvent,
        context: &CheckoutContext,
    ) -> Result<TransitionOutcome, CheckoutTransitionError>;
}

/// The cart -> delivery -> payment -> confirmation wizard with per-step guards.
#[derive(Clone, Debug, Default)]
pub struct StandardCheckout;

impl CheckoutDefinition for StandardCheckout {
    fn initial_state(&self) -> CheckoutState {
        CheckoutState::Cart
    }

    fn transition(
        &self,
        current: &CheckoutState,
        event: &CheckoutEvent,
        context: &CheckoutContext,
    ) -> Result<TransitionOutcome, CheckoutTransitionError> {
        transition_standard(current, event, context)
    }
}

pub struct CheckoutEngine<F> {
    flow: F,
}

impl<F> CheckoutEngine<F>
where
    F: CheckoutDefinition,
{
    pub fn new(flow: F) -> Self {
        Self { flow }
    }

    pub fn initial_state(&self) -> CheckoutState {
        self.flow.initial_state()
    }

    pub fn apply(
        &self,
        current: &CheckoutState,
        event: &CheckoutEvent,
        context: &CheckoutContext,
    ) -> Result<TransitionOutcome, CheckoutTransitionError> {
        self.flow.transition(current, event, context)
    }

    /// Like `apply`, but records the accepted or rejected transition on the
    /// session activity feed.
    pub fn apply_with_activity<S>(
        &self,
        current: &CheckoutState,
        event: &CheckoutEvent,
        context: &CheckoutContext,
        sink: &S,
    ) -> Result<TransitionOutcome, CheckoutTransitionError>
    where
        S: ActivitySink,
    {
        let result = self.apply(current, event, context);
        match &result {
            Ok(outcome) => {
                sink.emit(
                    ActivityEvent::new(
                        "checkout.transition_applied",
                        ActivityCategory::Checkout,
                        ActivityOutcome::Success,
                    )
                    .with_metadata("from", format!("{:?}", outcome.from))
                    .with_metadata("to", format!("{:?}", outcome.to))
                    .with_metadata("event", format!("{:?}", outcome.event)),
                );
            }
            Err(error) => {
                sink.emit(
                    ActivityEvent::new(
                        "checkout.transition_rejected",
                        ActivityCategory::Checkout,
                        ActivityOutcome::Rejected,
                    )
                    .with_metadata("error", error.to_string()),
                );
            }
        }
        result
    }
}

impl Default for CheckoutEngine<StandardCheckout> {
    fn default() -> Self {
        Self::new(StandardCheckout)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CheckoutTransitionError {
    #[error("cannot leave {state:?} with an empty cart")]
    EmptyCart { state: CheckoutState },
    #[error("missing required fields before leaving {state:?}: {missing_fields:?}")]
    MissingRequiredFields { state: CheckoutState, missing_fields: Vec<String> },
    #[error("invalid transition from {state:?} using event {event:?}")]
    InvalidTransition { state: CheckoutState, event: CheckoutEvent },
}

fn transition_standard(
    current: &CheckoutState,
    event: &CheckoutEvent,
    context: &CheckoutContext,
) -> Result<TransitionOutcome, CheckoutTransitionError> {
    use CheckoutAction::{CollectDeliveryDetails, CollectPaymentDetails, PlaceOrder};
    use CheckoutEvent::{
        BackRequested, CancelRequested, CartConfirmed, DeliverySubmitted, PaymentSubmitted,
    };
    use CheckoutState::{Cancelled, Cart, Confirmation, Delivery, Payment};

    let (to, actions) = match (current, event) {
        (Cart, CartConfirmed) => {
            if context.cart_is_empty {
                return Err(CheckoutTransitionError::EmptyCart { state: *current });
            }
            (Delivery, vec![CollectDeliveryDetails])
        }
        (Delivery, DeliverySubmitted) => {
            if !context.missing_required_fields.is_empty() {
                return Err(CheckoutTransitionError::MissingRequiredFields {
                    state: *current,
                    missing_fields: context.missing_required_fields.clone(),
                });
            }
            (Payment, vec![CollectPaymentDetails])
        }
        (Payment, PaymentSubmitted) => {
            if !context.missing_required_fields.is_empty() {
                return Err(CheckoutTransitionError::MissingRequiredFields {
                    state: *current,
                    missing_fields: context.missing_required_fields.clone(),
                });
            }
            (Confirmation, vec![PlaceOrder])
        }
        (Delivery, BackRequested) => (Cart, Vec::new()),
        (Payment, BackRequested) => (Delivery, Vec::new()),
        (Confirmation | Cancelled, _) => {
            return Err(CheckoutTransitionError::InvalidTransition {
                state: *current,
                event: *event,
            });
        }
        (_, CancelRequested) => (Cancelled, Vec::new()),
        _ => {
            return Err(CheckoutTransitionError::InvalidTransition {
                state: *current,
                event: *event,
            });
        }
    };

    Ok(TransitionOutcome { from: *current, to, event: *event, actions })
}

#[cfg(test)]
mod tests {
    use crate::activity::InMemoryActivitySink;
    use crate::flows::engine::{CheckoutEngine, CheckoutTransitionError, StandardCheckout};
    use crate::flows::states::{CheckoutAction, CheckoutContext, CheckoutEvent, CheckoutState};

    fn filled_context() -> CheckoutContext {
        CheckoutContext { cart_is_empty: false, missing_required_fields: Vec::new() }
    }

    #[test]
    fn happy_path_reaches_confirmation() {
        let engine = CheckoutEngine::new(StandardCheckout);
        let context = filled_context();
        let mut state = engine.initial_state();

        state = engine
            .apply(&state, &CheckoutEvent::CartConfirmed, &context)
            .expect("cart -> delivery")
            .to;
        state = engine
            .apply(&state, &CheckoutEvent::DeliverySubmitted, &context)
            .expect("delivery -> payment")
            .to;
        let placed = engine
            .apply(&state, &CheckoutEvent::PaymentSubmitted, &context)
            .expect("payment -> confirmation");

        assert_eq!(placed.to, CheckoutState::Confirmation);
        assert_eq!(placed.actions, vec![CheckoutAction::PlaceOrder]);
    }

    #[test]
    fn empty_cart_cannot_start_checkout() {
        let engine = CheckoutEngine::default();
        let context =
            CheckoutContext { cart_is_empty: true, missing_required_fields: Vec::new() };

        let error = engine
            .apply(&CheckoutState::Cart, &CheckoutEvent::CartConfirmed, &context)
            .expect_err("empty cart must be rejected");
        assert!(matches!(error, CheckoutTransitionError::EmptyCart { .. }));
    }

    #[test]
    fn incomplete_delivery_details_block_the_payment_step() {
        let engine = CheckoutEngine::default();
        let context = CheckoutContext {
            cart_is_empty: false,
            missing_required_fields: vec!["address".to_owned(), "zip_code".to_owned()],
        };

        let error = engine
            .apply(&CheckoutState::Delivery, &CheckoutEvent::DeliverySubmitted, &context)
            .expect_err("missing fields must be rejected");
        assert!(matches!(
            error,
            CheckoutTransitionError::MissingRequiredFields { state: CheckoutState::Delivery, .. }
        ));
    }

    #[test]
    fn back_transitions_walk_the_wizard_in_reverse() {
        let engine = CheckoutEngine::default();
        let context = filled_context();

        let back = engine
            .apply(&CheckoutState::Payment, &CheckoutEvent::BackRequested, &context)
            .expect("payment -> delivery");
        assert_eq!(back.to, CheckoutState::Delivery);
        assert!(back.actions.is_empty());

        let back = engine
            .apply(&CheckoutState::Delivery, &CheckoutEvent::BackRequested, &context)
            .expect("delivery -> cart");
        assert_eq!(back.to, CheckoutState::Cart);
    }

    #[test]
    fn cancel_is_accepted_from_any_pre_confirmation_state() {
        let engine = CheckoutEngine::default();
        let context = filled_context();

        for state in [CheckoutState::Cart, CheckoutState::Delivery, CheckoutState::Payment] {
            let outcome = engine
                .apply(&state, &CheckoutEvent::CancelRequested, &context)
                .expect("cancel should be accepted");
            assert_eq!(outcome.to, CheckoutState::Cancelled);
        }
    }

    #[test]
    fn confirmation_is_terminal() {
        let engine = CheckoutEngine::default();
        let error = engine
            .apply(&CheckoutState::Confirmation, &CheckoutEvent::BackRequested, &filled_context())
            .expect_err("confirmation accepts no events");
        assert!(matches!(error, CheckoutTransitionError::InvalidTransition { .. }));
    }

    #[test]
    fn skipping_a_step_is_rejected() {
        let engine = CheckoutEngine::default();
        let error = engine
            .apply(&CheckoutState::Cart, &CheckoutEvent::PaymentSubmitted, &filled_context())
            .expect_err("cart cannot jump to payment");
        assert!(matches!(
            error,
            CheckoutTransitionError::InvalidTransition {
                state: CheckoutState::Cart,
                event: CheckoutEvent::PaymentSubmitted
            }
        ));
    }

    #[test]
    fn replay_is_deterministic_for_the_same_event_sequence() {
        let engine = CheckoutEngine::default();
        let events = [
            CheckoutEvent::CartConfirmed,
            CheckoutEvent::DeliverySubmitted,
            CheckoutEvent::BackRequested,
            CheckoutEvent::DeliverySubmitted,
            CheckoutEvent::PaymentSubmitted,
        ];

        let run = |engine: &CheckoutEngine<StandardCheckout>| {
            let mut state = engine.initial_state();
            let mut actions = Vec::new();
            for event in &events {
                let outcome =
                    engine.apply(&state, event, &filled_context()).expect("deterministic run");
                actions.push(outcome.actions);
                state = outcome.to;
            }
            (state, actions)
        };

        assert_eq!(run(&engine), run(&engine));
    }

    #[test]
    fn transitions_are_recorded_on_the_activity_feed() {
        let engine = CheckoutEngine::default();
        let sink = InMemoryActivitySink::default();

        let _ = engine
            .apply_with_activity(
                &CheckoutState::Cart,
                &CheckoutEvent::CartConfirmed,
                &filled_context(),
                &sink,
            )
            .expect("transition should succeed");
        let _ = engine.apply_with_activity(
            &CheckoutState::Cart,
            &CheckoutEvent::PaymentSubmitted,
            &filled_context(),
            &sink,
        );

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "checkout.transition_applied");
        assert_eq!(events[0].metadata.get("to").map(String::as_str), Some("Delivery"));
        assert_eq!(events[1].event_type, "checkout.transition_rejected");
    }
}
