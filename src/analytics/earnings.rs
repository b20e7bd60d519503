//! Earnings analytics over shop orders.
//!
//! DESIGN
//! ======
//! Orders are first narrowed to a period ending at an anchor instant, then
//! reduced into totals, a per-day series, top products, a category breakdown
//! and a 30-day forecast. Every step takes the filtered slice, so the
//! breakdowns always agree with the totals shown beside them.
//!
//! TRADE-OFFS
//! ==========
//! Profit is a flat 40% of revenue; the backend exposes no cost data. Days
//! are UTC dates, matching how the backend stamps `created_at`.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::Serialize;

use super::{Tally, round2};
use crate::display::UNKNOWN_PRODUCT;
use crate::error::DashboardError;
use crate::models::{Category, Order, Product};

pub const PROFIT_RATE: f64 = 0.4;
pub const TOP_PRODUCT_COUNT: usize = 3;
pub const FORECAST_DAYS: f64 = 30.0;
pub const UNCATEGORIZED_ID: &str = "uncategorized";
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";
pub const CSV_HEADER: &str = "Date,Amount";

// =============================================================================
// PERIOD
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
    All,
}

impl Period {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Quarter => "This Quarter",
            Self::Year => "This Year",
            Self::All => "All Time",
        }
    }

    /// Inclusive lower bound of the period ending at `anchor`; `None` for
    /// [`Period::All`].
    ///
    /// Week starts seven days before the anchor's date; month, quarter and
    /// year start on their first day. All bounds are midnight UTC.
    #[must_use]
    pub fn start(self, anchor: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let today = anchor.date_naive();
        let first_day = match self {
            Self::Week => today.checked_sub_days(Days::new(7))?,
            Self::Month => today.with_day(1)?,
            Self::Quarter => NaiveDate::from_ymd_opt(today.year(), quarter_start_month(today.month()), 1)?,
            Self::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
            Self::All => return None,
        };
        first_day.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc())
    }
}

fn quarter_start_month(month: u32) -> u32 {
    (month - 1) / 3 * 3 + 1
}

impl FromStr for Period {
    type Err = DashboardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            "all" => Ok(Self::All),
            other => Err(DashboardError::validation(format!(
                "unknown period '{other}' (expected week, month, quarter, year or all)"
            ))),
        }
    }
}

/// The instant a period is measured back from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodAnchor {
    /// The caller's clock.
    #[default]
    Now,
    /// The newest order timestamp, falling back to the caller's clock.
    LatestTransaction,
}

impl PeriodAnchor {
    #[must_use]
    pub fn resolve(self, orders: &[Order], now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Now => now,
            Self::LatestTransaction => orders.iter().filter_map(|o| o.created_at).max().unwrap_or(now),
        }
    }
}

impl FromStr for PeriodAnchor {
    type Err = DashboardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "now" => Ok(Self::Now),
            "latest" | "latest_transaction" => Ok(Self::LatestTransaction),
            other => Err(DashboardError::validation(format!("unknown anchor '{other}' (expected now or latest)"))),
        }
    }
}

/// Orders created at or after the period start, in input order. Orders with
/// no timestamp only survive [`Period::All`].
#[must_use]
pub fn filter_by_period(orders: &[Order], period: Period, anchor_at: DateTime<Utc>) -> Vec<&Order> {
    match period.start(anchor_at) {
        None => orders.iter().collect(),
        Some(start) => orders.iter().filter(|o| o.created_at.is_some_and(|at| at >= start)).collect(),
    }
}

// =============================================================================
// REDUCTIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub revenue: f64,
    pub profit: f64,
    /// Percent; zero when there is no revenue.
    pub margin: f64,
}

impl Totals {
    /// Margin with two decimals, e.g. `"40.00"`.
    #[must_use]
    pub fn margin_label(&self) -> String {
        format!("{:.2}", self.margin)
    }
}

#[must_use]
pub fn totals(orders: &[&Order]) -> Totals {
    let revenue: f64 = orders.iter().map(|o| o.amount()).sum();
    let profit = revenue * PROFIT_RATE;
    let margin = if revenue > 0.0 { profit / revenue * 100.0 } else { 0.0 };
    Totals { revenue, profit, margin }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyEarning {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Order amounts summed per UTC day, in first-seen order.
#[must_use]
pub fn daily_earnings(orders: &[&Order]) -> Vec<DailyEarning> {
    let mut days: Tally<NaiveDate, f64> = Tally::new();
    for order in orders {
        if let Some(at) = order.created_at {
            *days.entry(at.date_naive()) += order.amount();
        }
    }
    days.into_vec().into_iter().map(|(date, amount)| DailyEarning { date, amount }).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
    pub product_id: String,
    pub name: String,
    pub sales: f64,
}

/// Best-selling products by `quantity × price`. Ties keep first-seen order.
#[must_use]
pub fn top_products(orders: &[&Order], products: &[Product], limit: usize) -> Vec<ProductSales> {
    let lookup = product_lookup(products);
    let mut sales: Tally<&str, f64> = Tally::new();
    for item in orders.iter().flat_map(|o| &o.items) {
        *sales.entry(item.product_id.as_str()) += item.line_total();
    }

    let mut ranked = sales.into_vec();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .take(limit)
        .map(|(id, sales)| ProductSales {
            product_id: id.to_string(),
            name: lookup.get(id).map_or_else(|| UNKNOWN_PRODUCT.to_string(), |p| p.name.clone()),
            sales,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    pub category_id: String,
    pub name: String,
    pub value: f64,
}

/// Item revenue per product category. Items whose product is unknown or has
/// no category land in the `uncategorized` bucket.
#[must_use]
pub fn revenue_by_category(orders: &[&Order], products: &[Product], categories: &[Category]) -> Vec<CategoryRevenue> {
    let lookup = product_lookup(products);
    let mut buckets: Tally<&str, f64> = Tally::new();
    for item in orders.iter().flat_map(|o| &o.items) {
        let bucket = lookup
            .get(item.product_id.as_str())
            .and_then(|p| p.category_id.as_deref())
            .filter(|id| !id.is_empty())
            .unwrap_or(UNCATEGORIZED_ID);
        *buckets.entry(bucket) += item.line_total();
    }

    let mut names: HashMap<&str, &str> = HashMap::new();
    for category in categories {
        names.entry(category.id.as_str()).or_insert(category.name.as_str());
    }

    buckets
        .into_vec()
        .into_iter()
        .map(|(id, value)| {
            let name = match names.get(id) {
                Some(name) => (*name).to_string(),
                None if id == UNCATEGORIZED_ID => UNCATEGORIZED_NAME.to_string(),
                None => UNKNOWN_CATEGORY.to_string(),
            };
            CategoryRevenue { category_id: id.to_string(), name, value }
        })
        .collect()
}

/// Projected earnings 30 days out: the last daily amount plus 30 times the
/// mean day-over-day change, floored at zero. Needs at least two days.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn forecast(daily: &[DailyEarning]) -> f64 {
    let [.., last] = daily else { return 0.0 };
    if daily.len() < 2 {
        return 0.0;
    }
    let changes: f64 = daily.windows(2).map(|w| w[1].amount - w[0].amount).sum();
    let mean_change = changes / (daily.len() - 1) as f64;
    round2((last.amount + mean_change * FORECAST_DAYS).max(0.0))
}

/// `Date,Amount` CSV of the daily series.
#[must_use]
pub fn to_csv(daily: &[DailyEarning]) -> String {
    let mut lines = vec![CSV_HEADER.to_string()];
    lines.extend(daily.iter().map(|d| format!("{},{}", d.date.format("%Y-%m-%d"), d.amount)));
    lines.join("\n")
}

fn product_lookup(products: &[Product]) -> HashMap<&str, &Product> {
    let mut lookup = HashMap::new();
    for product in products {
        lookup.entry(product.sanity_id.as_str()).or_insert(product);
    }
    lookup
}

// =============================================================================
// REPORT
// =============================================================================

/// Everything the earnings view shows for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarningsReport {
    pub period: Period,
    pub period_label: &'static str,
    pub anchor_at: DateTime<Utc>,
    pub order_count: usize,
    pub totals: Totals,
    pub profit_margin: String,
    pub daily: Vec<DailyEarning>,
    pub top_products: Vec<ProductSales>,
    pub revenue_by_category: Vec<CategoryRevenue>,
    pub forecast: f64,
    /// Forecast relative to period revenue, in percent.
    pub forecast_growth: Option<f64>,
}

impl EarningsReport {
    #[must_use]
    pub fn compute(
        orders: &[Order],
        products: &[Product],
        categories: &[Category],
        period: Period,
        anchor: PeriodAnchor,
        now: DateTime<Utc>,
    ) -> Self {
        let anchor_at = anchor.resolve(orders, now);
        let filtered = filter_by_period(orders, period, anchor_at);
        let totals = totals(&filtered);
        let daily = daily_earnings(&filtered);
        let forecast = forecast(&daily);
        let forecast_growth = (totals.revenue > 0.0).then(|| round2((forecast / totals.revenue - 1.0) * 100.0));

        Self {
            period,
            period_label: period.label(),
            anchor_at,
            order_count: filtered.len(),
            profit_margin: totals.margin_label(),
            top_products: top_products(&filtered, products, TOP_PRODUCT_COUNT),
            revenue_by_category: revenue_by_category(&filtered, products, categories),
            totals,
            daily,
            forecast,
            forecast_growth,
        }
    }

    #[must_use]
    pub fn csv(&self) -> String {
        to_csv(&self.daily)
    }
}

#[cfg(test)]
#[path = "earnings_test.rs"]
mod tests;
