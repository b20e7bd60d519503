//! Grooming and pet-hotel bookings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use super::people::User;

wire_status! {
    /// Booking lifecycle shared by grooming and hotel stays:
    /// `PENDING → CONFIRMED | DECLINED → IN_PROGRESS → COMPLETED | CANCELLED`.
    BookingStatus {
        Pending => "PENDING",
        Confirmed => "CONFIRMED",
        Declined => "DECLINED",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
}

impl BookingStatus {
    /// The next step once a booking is confirmed.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Confirmed => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            _ => None,
        }
    }
}

// =============================================================================
// GROOMING
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroomingService {
    pub id: i64,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "de::amount")]
    pub price: f64,
    /// Minutes.
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub duration: u32,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroomingBooking {
    pub id: i64,
    #[serde(default)]
    pub pet_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub services: Vec<GroomingService>,
    #[serde(default)]
    pub cancel_reason: Option<String>,
}

impl GroomingBooking {
    /// Sum of the booked services' prices.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.services.iter().map(|s| s.price).sum()
    }
}

/// Grooming booking created by the shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroomingBooking {
    pub pet_id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub start_time: String,
    pub service_ids: Vec<i64>,
    /// Minutes, rounded up to whole hours.
    pub duration: u32,
}

impl NewGroomingBooking {
    /// Multipart fields; `service_ids` travel comma-joined.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let service_ids: Vec<String> = self.service_ids.iter().map(ToString::to_string).collect();
        vec![
            ("pet_id", self.pet_id.to_string()),
            ("user_id", self.user_id.to_string()),
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("start_time", self.start_time.clone()),
            ("service_ids", service_ids.join(",")),
            ("duration", self.duration.to_string()),
        ]
    }
}

/// Partial grooming booking update; unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroomingBookingUpdate {
    pub status: Option<BookingStatus>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub duration: Option<u32>,
    pub cancel_reason: Option<String>,
}

impl GroomingBookingUpdate {
    #[must_use]
    pub fn status(status: BookingStatus) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        [
            ("status", self.status.map(|s| s.as_str().to_string())),
            ("date", self.date.map(|d| d.format("%Y-%m-%d").to_string())),
            ("start_time", self.start_time.clone()),
            ("duration", self.duration.map(|d| d.to_string())),
            ("cancel_reason", self.cancel_reason.clone()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
}

// =============================================================================
// HOTEL
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelBooking {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub pet_id: Option<i64>,
    #[serde(default)]
    pub hotel_id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, deserialize_with = "de::opt_amount")]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub pet_size: Option<String>,
    #[serde(default)]
    pub dietary_needs: Option<String>,
    #[serde(default)]
    pub medication_needs: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewHotelBooking {
    pub user_id: i64,
    pub pet_id: i64,
    pub hotel_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pet_size: String,
    pub dietary_needs: String,
    pub medication_needs: String,
    pub special_requests: String,
    pub emergency_contact: String,
}

impl NewHotelBooking {
    /// Default emergency contact for a customer: `"{name} {phone}"`.
    #[must_use]
    pub fn emergency_contact_for(user: &User) -> String {
        format!(
            "{} {}",
            user.name.as_deref().unwrap_or_default(),
            user.phone_number.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HotelBookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}
