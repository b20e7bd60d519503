//! Orders, products and categories.

use serde_json::{Value, json};
use tracing::{info, warn};

use super::ApiClient;
use crate::error::Result;
use crate::models::{Category, Order, Product};

/// Shop decision on a pending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    Accept,
    Decline { reason: Option<String> },
}

impl OrderAction {
    /// Endpoint path and JSON body for this action on `order_id`.
    #[must_use]
    pub fn request(&self, order_id: i64) -> (String, Value) {
        match self {
            Self::Accept => (format!("/orders/{order_id}/accept_by_shop"), json!({})),
            Self::Decline { reason } => (
                format!("/orders/{order_id}/decline"),
                json!({ "decline_reason": reason.as_deref().unwrap_or_default() }),
            ),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Decline { .. } => "decline",
        }
    }
}

/// Orders still waiting on the shop, in backend order.
#[must_use]
pub fn pending_only(orders: &[Order]) -> Vec<Order> {
    orders.iter().filter(|o| o.is_pending()).cloned().collect()
}

impl ApiClient {
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_orders(&self) -> Result<Vec<Order>> {
        self.get_json("/orders").await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_pending_orders(&self) -> Result<Vec<Order>> {
        Ok(pending_only(&self.fetch_orders().await?))
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.get_json("/products").await
    }

    /// Product categories. A failed fetch degrades to an empty list.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` lets callers join it with other fetches.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        match self.get_json("/sanity/categories").await {
            Ok(categories) => Ok(categories),
            Err(e) => {
                warn!(error = %e, "category fetch failed; continuing without categories");
                Ok(Vec::new())
            }
        }
    }

    /// Accept or decline `order_id`.
    ///
    /// # Errors
    ///
    /// `Status` with the backend detail when the action is rejected.
    pub async fn order_action(&self, order_id: i64, action: &OrderAction) -> Result<Value> {
        let (path, body) = action.request(order_id);
        let result = self.post_json(&path, &body).await?;
        info!(order_id, action = action.label(), "order action applied");
        Ok(result)
    }
}
