//! Orders page: pending queue, order history, and the earnings view.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::{Page, settle};
use crate::analytics::{EarningsReport, Period, PeriodAnchor};
use crate::api::ApiClient;
use crate::api::shop::{OrderAction, pending_only};
use crate::display::{self, UNKNOWN_PRODUCT};
use crate::error::Result;
use crate::models::{Category, Order, OrderStatus, Product};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLineView {
    pub product: String,
    pub quantity: String,
    pub price: String,
}

/// Rendered order card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    pub id: i64,
    pub status: OrderStatus,
    pub placed_at: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub address: Vec<String>,
    pub items: Vec<OrderLineView>,
    pub subtotal: String,
    pub delivery_fee: String,
    pub total: String,
}

impl OrderView {
    #[must_use]
    pub fn build(order: &Order, products: &[Product]) -> Self {
        let address = order
            .delivery_address
            .as_ref()
            .map(crate::models::DeliveryAddress::lines)
            .filter(|lines| !lines.is_empty())
            .unwrap_or_else(|| vec![display::NOT_AVAILABLE.to_string()]);

        Self {
            id: order.id,
            status: order.status,
            placed_at: display::timestamp_or_na(order.created_at),
            customer_name: display::text_or_na(order.customer_name.as_deref()).to_string(),
            customer_email: display::text_or_na(order.customer_email.as_deref()).to_string(),
            customer_phone: display::text_or_na(order.customer_phone.as_deref()).to_string(),
            address,
            items: order
                .items
                .iter()
                .map(|item| OrderLineView {
                    product: product_name(products, &item.product_id).to_string(),
                    quantity: item.quantity.map_or_else(|| display::NOT_AVAILABLE.to_string(), |q| q.to_string()),
                    price: display::money_or_zero(item.price),
                })
                .collect(),
            subtotal: display::money(order.subtotal()),
            delivery_fee: display::money_or_zero(order.delivery_fee),
            total: display::money_or_zero(order.total_amount),
        }
    }
}

/// Product name for an order item's `product_id`.
#[must_use]
pub fn product_name<'a>(products: &'a [Product], product_id: &str) -> &'a str {
    products.iter().find(|p| p.sanity_id == product_id).map_or(UNKNOWN_PRODUCT, |p| p.name.as_str())
}

pub struct OrdersPage {
    client: ApiClient,
    orders: Vec<Order>,
    pending: Vec<Order>,
    products: Vec<Product>,
    categories: Vec<Category>,
    error: Option<String>,
}

impl OrdersPage {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            orders: Vec::new(),
            pending: Vec::new(),
            products: Vec::new(),
            categories: Vec::new(),
            error: None,
        }
    }

    /// Orders awaiting a shop decision, in backend order.
    #[must_use]
    pub fn pending(&self) -> &[Order] {
        &self.pending
    }

    /// Every order the shop has received.
    #[must_use]
    pub fn history(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn pending_views(&self) -> Vec<OrderView> {
        self.pending.iter().map(|o| OrderView::build(o, &self.products)).collect()
    }

    #[must_use]
    pub fn history_views(&self) -> Vec<OrderView> {
        self.orders.iter().map(|o| OrderView::build(o, &self.products)).collect()
    }

    /// Earnings over the loaded order history.
    #[must_use]
    pub fn earnings(&self, period: Period, anchor: PeriodAnchor, now: DateTime<Utc>) -> EarningsReport {
        EarningsReport::compute(&self.orders, &self.products, &self.categories, period, anchor, now)
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn accept(&mut self, order_id: i64) -> Result<()> {
        self.client.order_action(order_id, &OrderAction::Accept).await?;
        self.reload().await
    }

    /// Decline with an optional reason; a blank reason is sent as `""`.
    ///
    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn decline(&mut self, order_id: i64, reason: Option<String>) -> Result<()> {
        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        self.client.order_action(order_id, &OrderAction::Decline { reason }).await?;
        self.reload().await
    }
}

#[async_trait]
impl Page for OrdersPage {
    async fn reload(&mut self) -> Result<()> {
        let loaded = tokio::try_join!(
            self.client.fetch_orders(),
            self.client.fetch_products(),
            self.client.fetch_categories(),
        );
        let (orders, products, categories) = settle("orders", "Failed to fetch data", &mut self.error, loaded)?;

        self.pending = pending_only(&orders);
        self.orders = orders;
        self.products = products;
        self.categories = categories;
        info!(orders = self.orders.len(), pending = self.pending.len(), "orders page loaded");
        Ok(())
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
#[path = "orders_test.rs"]
mod tests;
