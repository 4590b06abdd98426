use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where and to whom a finished order ships. Collected in the delivery step of
/// the checkout wizard; `missing_fields` drives that step's transition guard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub delivery_date: Option<NaiveDate>,
    pub delivery_time: Option<String>,
    pub gift_message: Option<String>,
}

impl DeliveryDetails {
    /// Names of required fields that are still blank. `delivery_time` and
    /// `gift_message` are optional.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("phone", &self.phone),
            ("recipient_name", &self.recipient_name),
            ("recipient_phone", &self.recipient_phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip_code", &self.zip_code),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                missing.push(name.to_owned());
            }
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            missing.push("email".to_owned());
        }
        if self.delivery_date.is_none() {
            missing.push("delivery_date".to_owned());
        }
        missing
    }
}

/// Card fields collected in the payment step. Used only for per-step validation
/// and a masked display summary; nothing here is charged or stored on an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub card_name: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

impl PaymentDetails {
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.card_name.trim().is_empty() {
            missing.push("card_name".to_owned());
        }
        let digits: String = self.card_number.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 12 {
            missing.push("card_number".to_owned());
        }
        if self.expiry.trim().is_empty() {
            missing.push("expiry".to_owned());
        }
        if self.cvv.trim().is_empty() {
            missing.push("cvv".to_owned());
        }
        missing
    }

    /// Last four digits only, for the confirmation summary.
    pub fn masked_card(&self) -> String {
        let digits: String = self.card_number.chars().filter(char::is_ascii_digit).collect();
        match digits.len() {
            0..=3 => "****".to_owned(),
            len => format!("**** {}", &digits[len - 4..]),
        }
    }
}

/// Linear fulfillment progression shown on the tracking page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Confirmed,
    Preparing,
    EnRoute,
    Delivered,
}

impl OrderStatus {
    /// Next stage; saturates at `Delivered`.
    pub fn next(self) -> Self {
        match self {
            Self::Confirmed => Self::Preparing,
            Self::Preparing => Self::EnRoute,
            Self::EnRoute | Self::Delivered => Self::Delivered,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// A placed order. In-memory value only; there is no persistence layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub reference: String,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub delivery: DeliveryDetails,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    pub fn advance(&mut self) {
        self.status = self.status.next();
    }
}
