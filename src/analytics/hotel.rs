//! Pet hotel booking analytics.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use super::Tally;
use crate::error::DashboardError;
use crate::models::{BookingStatus, Hotel, HotelBooking};

/// Window for the per-hotel breakdown, relative to the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    Month,
    #[default]
    Year,
}

impl FromStr for TimeFrame {
    type Err = DashboardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(DashboardError::validation(format!("unknown time frame '{other}' (expected month or year)"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
struct Bucket {
    bookings: u32,
    revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBookings {
    /// `Mon YYYY`, e.g. `Mar 2024`.
    pub month: String,
    pub bookings: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: BookingStatus,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelShare {
    pub hotel_id: Option<i64>,
    pub name: String,
    pub bookings: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelSummary {
    pub total_bookings: usize,
    pub total_revenue: f64,
    pub average_bookings_per_month: f64,
    pub monthly: Vec<MonthlyBookings>,
    pub status_counts: Vec<StatusCount>,
    pub time_frame: TimeFrame,
    pub hotels: Vec<HotelShare>,
}

impl HotelSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(bookings: &[HotelBooking], hotels: &[Hotel], time_frame: TimeFrame, now: DateTime<Utc>) -> Self {
        let names: HashMap<i64, &str> = hotels.iter().filter_map(|h| Some((h.id, h.name.as_deref()?))).collect();
        let today = now.date_naive();

        let mut monthly: Tally<String, Bucket> = Tally::new();
        let mut statuses: Tally<BookingStatus, u32> = Tally::new();
        let mut per_hotel: Tally<Option<i64>, Bucket> = Tally::new();

        for booking in bookings {
            let price = booking.total_price.unwrap_or(0.0);
            if let Some(start) = booking.start_date {
                let bucket = monthly.entry(start.format("%b %Y").to_string());
                bucket.bookings += 1;
                bucket.revenue += price;

                let in_frame = match time_frame {
                    TimeFrame::Year => start.year() == today.year(),
                    TimeFrame::Month => start.year() == today.year() && start.month() == today.month(),
                };
                if in_frame {
                    let bucket = per_hotel.entry(booking.hotel_id);
                    bucket.bookings += 1;
                    bucket.revenue += price;
                }
            }
            *statuses.entry(booking.status) += 1;
        }

        let total_bookings = bookings.len();
        let month_count = monthly.len().max(1);

        Self {
            total_bookings,
            total_revenue: bookings.iter().filter_map(|b| b.total_price).sum(),
            average_bookings_per_month: total_bookings as f64 / month_count as f64,
            monthly: monthly
                .into_vec()
                .into_iter()
                .map(|(month, b)| MonthlyBookings { month, bookings: b.bookings, revenue: b.revenue })
                .collect(),
            status_counts: statuses.into_vec().into_iter().map(|(status, count)| StatusCount { status, count }).collect(),
            time_frame,
            hotels: per_hotel
                .into_vec()
                .into_iter()
                .map(|(hotel_id, b)| HotelShare {
                    hotel_id,
                    name: hotel_name(hotel_id, &names),
                    bookings: b.bookings,
                    revenue: b.revenue,
                })
                .collect(),
        }
    }
}

fn hotel_name(hotel_id: Option<i64>, names: &HashMap<i64, &str>) -> String {
    match hotel_id {
        Some(id) => names.get(&id).map_or_else(|| format!("Hotel {id}"), |name| (*name).to_string()),
        None => crate::display::NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
#[path = "hotel_test.rs"]
mod tests;
