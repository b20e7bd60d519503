//! Shop orders, products and categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

wire_status! {
    /// Order lifecycle as reported by the backend.
    OrderStatus {
        Pending => "PENDING",
        Accepted => "ACCEPTED",
        Confirmed => "CONFIRMED",
        Declined => "DECLINED",
        Processing => "PROCESSING",
        Shipped => "SHIPPED",
        Delivered => "DELIVERED",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl DeliveryAddress {
    /// Printable address lines; blank parts are skipped.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

        // "City, State Postal"
        let mut locality = String::new();
        if let Some(city) = present(&self.city) {
            locality.push_str(&city);
        }
        if let Some(state) = present(&self.state) {
            if !locality.is_empty() {
                locality.push_str(", ");
            }
            locality.push_str(&state);
        }
        if let Some(postal) = present(&self.postal_code) {
            if !locality.is_empty() {
                locality.push(' ');
            }
            locality.push_str(&postal);
        }

        [
            present(&self.address_line1),
            present(&self.address_line2),
            (!locality.is_empty()).then_some(locality),
            present(&self.country),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, deserialize_with = "de::id_string")]
    pub product_id: String,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_amount")]
    pub price: Option<f64>,
}

impl OrderItem {
    /// `quantity × price`, with missing values counting as zero.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity.unwrap_or(0)) * self.price.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub items: Vec<OrderItem>,
    #[serde(default, deserialize_with = "de::opt_amount")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_amount")]
    pub delivery_fee: Option<f64>,
    #[serde(default)]
    pub delivery_address: Option<DeliveryAddress>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "de::opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Order total, null counting as zero.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.total_amount.unwrap_or(0.0)
    }

    /// Total less the delivery fee.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.amount() - self.delivery_fee.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    /// Join key referenced by `OrderItem::product_id`.
    #[serde(default, deserialize_with = "de::id_string")]
    pub sanity_id: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", default, deserialize_with = "de::id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub name: String,
}
