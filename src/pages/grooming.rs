//! Grooming bookings page.
//!
//! DESIGN
//! ======
//! Bookings are kept with completed ones last (stable otherwise) and split
//! into the "current" and "completed" tabs. The lifecycle buttons map onto
//! backend calls: accept/decline for `PENDING`, a status update for
//! `CONFIRMED → IN_PROGRESS → COMPLETED`, and cancel for `CONFIRMED`.
//!
//! Time slots run hourly from 10:00, sized to the booking's duration rounded
//! up to whole hours, and must end by 22:00.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use super::{Page, require_text, settle};
use crate::analytics::GroomingSummary;
use crate::api::ApiClient;
use crate::display::{self, UNKNOWN_PET, UNKNOWN_USER};
use crate::error::{DashboardError, Result};
use crate::models::{
    AvailableSlot, BookingStatus, GroomingBooking, GroomingBookingUpdate, GroomingService, NewGroomingBooking, Pet,
    User,
};

/// First bookable hour of the day.
pub const OPENING_HOUR: u32 = 10;
/// Hour by which every booking must end.
pub const CLOSING_HOUR: u32 = 22;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// `HH:00`.
    pub start: String,
    /// `HH:00`.
    pub end: String,
    pub available: bool,
}

impl TimeSlot {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

/// Sum of the selected services' durations, rounded up to whole hours.
///
/// Unknown service ids contribute nothing.
#[must_use]
pub fn total_duration(service_ids: &[i64], services: &[GroomingService]) -> u32 {
    let minutes: u32 = service_ids
        .iter()
        .filter_map(|id| services.iter().find(|s| s.id == *id))
        .map(|s| s.duration)
        .sum();
    minutes.div_ceil(60) * 60
}

/// Hourly slots between opening and closing for a booking of `duration`
/// minutes, marked available when the backend lists their start time.
#[must_use]
pub fn time_slots(duration: u32, available: &[AvailableSlot]) -> Vec<TimeSlot> {
    let hours = duration.div_ceil(60);
    let Some(last_start) = (CLOSING_HOUR + 1).checked_sub(hours) else {
        return Vec::new();
    };

    (OPENING_HOUR..last_start)
        .map(|hour| {
            let start = format!("{hour:02}:00");
            TimeSlot {
                end: format!("{:02}:00", hour + hours),
                available: available.iter().any(|slot| slot.start_time == start),
                start,
            }
        })
        .collect()
}

/// Completed bookings sink to the end; relative order is otherwise kept.
fn completed_last(bookings: &mut [GroomingBooking]) {
    bookings.sort_by_key(|b| b.status == BookingStatus::Completed);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroomingBookingView {
    #[serde(flatten)]
    pub booking: GroomingBooking,
    pub pet_name: String,
    pub owner_name: String,
    pub value: String,
}

pub struct GroomingPage {
    client: ApiClient,
    bookings: Vec<GroomingBooking>,
    services: Vec<GroomingService>,
    users: Vec<User>,
    pets: Vec<Pet>,
    error: Option<String>,
}

impl GroomingPage {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            bookings: Vec::new(),
            services: Vec::new(),
            users: Vec::new(),
            pets: Vec::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn bookings(&self) -> &[GroomingBooking] {
        &self.bookings
    }

    #[must_use]
    pub fn services(&self) -> &[GroomingService] {
        &self.services
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// Every booking that is not yet completed.
    #[must_use]
    pub fn current(&self) -> Vec<GroomingBookingView> {
        self.views(|b| b.status != BookingStatus::Completed)
    }

    #[must_use]
    pub fn completed(&self) -> Vec<GroomingBookingView> {
        self.views(|b| b.status == BookingStatus::Completed)
    }

    fn views(&self, keep: impl Fn(&GroomingBooking) -> bool) -> Vec<GroomingBookingView> {
        let pets: HashMap<i64, &Pet> = self.pets.iter().map(|p| (p.id, p)).collect();
        let users: HashMap<i64, &User> = self.users.iter().map(|u| (u.id, u)).collect();

        self.bookings
            .iter()
            .filter(|b| keep(b))
            .map(|booking| {
                let pet_name = booking.pet_id.and_then(|id| pets.get(&id)).and_then(|p| p.name.as_deref());
                let owner_name = booking.user_id.and_then(|id| users.get(&id)).and_then(|u| u.name.as_deref());
                GroomingBookingView {
                    pet_name: display::text_or(pet_name, UNKNOWN_PET).to_string(),
                    owner_name: display::text_or(owner_name, UNKNOWN_USER).to_string(),
                    value: display::money(booking.value()),
                    booking: booking.clone(),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn analytics(&self) -> GroomingSummary {
        GroomingSummary::compute(&self.bookings)
    }

    fn status_of(&self, booking_id: i64) -> Result<BookingStatus> {
        self.bookings
            .iter()
            .find(|b| b.id == booking_id)
            .map(|b| b.status)
            .ok_or_else(|| DashboardError::validation(format!("Booking {booking_id} is not loaded")))
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn accept(&mut self, booking_id: i64) -> Result<()> {
        self.client.accept_grooming_booking(booking_id).await?;
        self.reload().await
    }

    /// # Errors
    ///
    /// `Validation` for a blank reason; otherwise the backend's rejection.
    pub async fn decline(&mut self, booking_id: i64, reason: &str) -> Result<()> {
        let reason = require_text(reason, "Please provide a reason for declining the booking.")?;
        self.client.decline_grooming_booking(booking_id, &reason).await?;
        self.reload().await
    }

    /// Move a booking to its next lifecycle step.
    ///
    /// # Errors
    ///
    /// `Validation` when the booking is unknown or has no next step;
    /// otherwise the backend's rejection.
    pub async fn advance(&mut self, booking_id: i64) -> Result<BookingStatus> {
        let current = self.status_of(booking_id)?;
        let next = current.next().ok_or_else(|| {
            DashboardError::validation(format!("Booking {booking_id} cannot move on from {current}"))
        })?;
        self.update(booking_id, &GroomingBookingUpdate::status(next)).await?;
        Ok(next)
    }

    /// Cancel a confirmed booking.
    ///
    /// # Errors
    ///
    /// `Validation` unless the booking is `CONFIRMED`; otherwise the
    /// backend's rejection.
    pub async fn cancel(&mut self, booking_id: i64) -> Result<()> {
        let current = self.status_of(booking_id)?;
        if current != BookingStatus::Confirmed {
            return Err(DashboardError::validation(format!(
                "Only confirmed bookings can be cancelled (booking {booking_id} is {current})"
            )));
        }
        self.update(booking_id, &GroomingBookingUpdate::status(BookingStatus::Cancelled)).await
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn update(&mut self, booking_id: i64, update: &GroomingBookingUpdate) -> Result<()> {
        self.client.update_grooming_booking(booking_id, update).await?;
        self.reload().await
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn delete(&mut self, booking_id: i64) -> Result<()> {
        self.client.delete_grooming_booking(booking_id).await?;
        self.reload().await
    }

    /// Create a booking; the duration is derived from the selected services.
    ///
    /// # Errors
    ///
    /// `Validation` when no service or start time is given; otherwise the
    /// backend's rejection (its `detail` is the message).
    pub async fn create(&mut self, mut booking: NewGroomingBooking) -> Result<GroomingBooking> {
        if booking.service_ids.is_empty() {
            return Err(DashboardError::validation("Please select at least one service"));
        }
        booking.start_time = require_text(&booking.start_time, "Please select a time slot")?;
        booking.duration = total_duration(&booking.service_ids, &self.services);

        let created = self.client.create_grooming_booking(&booking).await?;
        self.reload().await?;
        Ok(created)
    }

    /// Slots for `date` sized to the selected services.
    ///
    /// # Errors
    ///
    /// `Validation` when no service is selected; otherwise the backend's
    /// rejection.
    pub async fn available_time_slots(&self, date: NaiveDate, service_ids: &[i64]) -> Result<Vec<TimeSlot>> {
        if service_ids.is_empty() {
            return Err(DashboardError::validation("Please select at least one service"));
        }
        let available = self.client.fetch_available_slots(date).await?;
        Ok(time_slots(total_duration(service_ids, &self.services), &available))
    }
}

#[async_trait]
impl Page for GroomingPage {
    async fn reload(&mut self) -> Result<()> {
        let loaded = tokio::try_join!(
            self.client.fetch_all_grooming_bookings(0),
            self.client.fetch_grooming_services(),
            self.client.fetch_users(),
            self.client.fetch_pets(),
        );
        let (mut bookings, services, users, pets) =
            settle("grooming", "Failed to fetch grooming data", &mut self.error, loaded)?;

        completed_last(&mut bookings);
        self.bookings = bookings;
        self.services = services;
        self.users = users;
        self.pets = pets;
        info!(bookings = self.bookings.len(), "grooming page loaded");
        Ok(())
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
#[path = "grooming_test.rs"]
mod tests;
