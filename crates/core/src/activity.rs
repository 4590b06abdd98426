use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityCategory {
    Catalog,
    Cart,
    Wishlist,
    Checkout,
    Order,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityOutcome {
    Success,
    Rejected,
}

/// One recorded interaction. Replaces the original storefront's fire-and-forget
/// alert popups with explicit state the UI can render, dismiss, or replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub event_id: String,
    pub event_type: String,
    pub category: ActivityCategory,
    pub outcome: ActivityOutcome,
    pub metadata: BTreeMap<String, String>,
    pub occurred_at: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn new(
        event_type: impl Into<String>,
        category: ActivityCategory,
        outcome: ActivityOutcome,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            event_type: event_type.into(),
            category,
            outcome,
            metadata: BTreeMap::new(),
            occurred_at: Utc::now(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

pub trait ActivitySink: Send + Sync {
    fn emit(&self, event: ActivityEvent);
}

#[derive(Clone, Default)]
pub struct InMemoryActivitySink {
    events: Arc<Mutex<Vec<ActivityEvent>>>,
}

impl InMemoryActivitySink {
    pub fn events(&self) -> Vec<ActivityEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ActivitySink for InMemoryActivitySink {
    fn emit(&self, event: ActivityEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivityCategory, ActivityEvent, ActivityOutcome, ActivitySink, InMemoryActivitySink};

    #[test]
    fn in_memory_sink_records_events_in_order() {
        let sink = InMemoryActivitySink::default();
        sink.emit(
            ActivityEvent::new("cart.item_added", ActivityCategory::Cart, ActivityOutcome::Success)
                .with_metadata("product", "Rose Romance")
                .with_metadata("quantity", "1"),
        );
        sink.emit(ActivityEvent::new(
            "wishlist.toggled",
            ActivityCategory::Wishlist,
            ActivityOutcome::Success,
        ));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "cart.item_added");
        assert_eq!(events[0].metadata.get("product").map(String::as_str), Some("Rose Romance"));
        assert_ne!(events[0].event_id, events[1].event_id);
    }
}
