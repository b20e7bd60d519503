//! Grooming booking analytics.

use serde::Serialize;

use super::Tally;
use crate::models::GroomingBooking;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyEarning {
    /// Short month name, e.g. `Mar`.
    pub month: String,
    pub earnings: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCount {
    pub name: String,
    pub bookings: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroomingSummary {
    pub total_earnings: f64,
    pub total_bookings: usize,
    pub average_booking_value: f64,
    pub monthly_earnings: Vec<MonthlyEarning>,
    pub popular_services: Vec<ServiceCount>,
}

impl GroomingSummary {
    /// Booking value is the sum of its services' prices. Monthly buckets key
    /// on the short month name alone, so the same month of different years
    /// shares a bucket.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(bookings: &[GroomingBooking]) -> Self {
        let total_earnings: f64 = bookings.iter().map(GroomingBooking::value).sum();
        let total_bookings = bookings.len();
        let average_booking_value =
            if total_bookings == 0 { 0.0 } else { total_earnings / total_bookings as f64 };

        let mut months: Tally<String, f64> = Tally::new();
        let mut services: Tally<&str, u32> = Tally::new();
        for booking in bookings {
            if let Some(date) = booking.date {
                *months.entry(date.format("%b").to_string()) += booking.value();
            }
            for service in &booking.services {
                *services.entry(service.name.as_str()) += 1;
            }
        }

        Self {
            total_earnings,
            total_bookings,
            average_booking_value,
            monthly_earnings: months
                .into_vec()
                .into_iter()
                .map(|(month, earnings)| MonthlyEarning { month, earnings })
                .collect(),
            popular_services: services
                .into_vec()
                .into_iter()
                .map(|(name, bookings)| ServiceCount { name: name.to_string(), bookings })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "grooming_test.rs"]
mod tests;
