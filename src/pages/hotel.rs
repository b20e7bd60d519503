//! Pet hotel bookings page.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::{Page, require_text, settle};
use crate::analytics::{HotelSummary, TimeFrame};
use crate::api::ApiClient;
use crate::display::{self, UNKNOWN_PET, UNKNOWN_USER};
use crate::error::{DashboardError, Result};
use crate::models::{Hotel, HotelBooking, HotelBookingUpdate, NewHotelBooking, Pet, User};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelBookingView {
    #[serde(flatten)]
    pub booking: HotelBooking,
    pub pet_name: String,
    pub owner_name: String,
    pub hotel_name: String,
}

pub struct HotelPage {
    client: ApiClient,
    bookings: Vec<HotelBooking>,
    pets: Vec<Pet>,
    users: Vec<User>,
    hotels: Vec<Hotel>,
    error: Option<String>,
}

impl HotelPage {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            bookings: Vec::new(),
            pets: Vec::new(),
            users: Vec::new(),
            hotels: Vec::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn bookings(&self) -> &[HotelBooking] {
        &self.bookings
    }

    #[must_use]
    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Bookings whose pet or owner name contains `term`, ignoring case.
    /// A blank term matches every booking.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<HotelBookingView> {
        let term = term.trim().to_lowercase();
        let pets: HashMap<i64, &str> = self.pets.iter().filter_map(|p| Some((p.id, p.name.as_deref()?))).collect();
        let users: HashMap<i64, &str> = self.users.iter().filter_map(|u| Some((u.id, u.name.as_deref()?))).collect();
        let hotels: HashMap<i64, &str> = self.hotels.iter().filter_map(|h| Some((h.id, h.name.as_deref()?))).collect();

        self.bookings
            .iter()
            .filter_map(|booking| {
                let pet = booking.pet_id.and_then(|id| pets.get(&id).copied());
                let owner = booking.user_id.and_then(|id| users.get(&id).copied());
                let matches = |name: Option<&str>| name.is_some_and(|n| n.to_lowercase().contains(&term));
                if !term.is_empty() && !matches(pet) && !matches(owner) {
                    return None;
                }
                let hotel_name = match booking.hotel_id {
                    Some(id) => hotels.get(&id).map_or_else(|| format!("Hotel {id}"), |name| (*name).to_string()),
                    None => display::NOT_AVAILABLE.to_string(),
                };
                Some(HotelBookingView {
                    pet_name: display::text_or(pet, UNKNOWN_PET).to_string(),
                    owner_name: display::text_or(owner, UNKNOWN_USER).to_string(),
                    hotel_name,
                    booking: booking.clone(),
                })
            })
            .collect()
    }

    #[must_use]
    pub fn analytics(&self, time_frame: TimeFrame, now: DateTime<Utc>) -> HotelSummary {
        HotelSummary::compute(&self.bookings, &self.hotels, time_frame, now)
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn accept(&mut self, booking_id: i64) -> Result<()> {
        self.client.accept_hotel_booking(booking_id).await?;
        self.reload().await
    }

    /// Decline with an optional reason; blank is sent as `""`.
    ///
    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn decline(&mut self, booking_id: i64, reason: Option<&str>) -> Result<()> {
        let reason = reason.map(str::trim).unwrap_or_default();
        self.client.decline_hotel_booking(booking_id, reason).await?;
        self.reload().await
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn update(&mut self, booking_id: i64, update: &HotelBookingUpdate) -> Result<()> {
        self.client.update_hotel_booking(booking_id, update).await?;
        self.reload().await
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn delete(&mut self, booking_id: i64) -> Result<()> {
        self.client.delete_hotel_booking(booking_id).await?;
        self.reload().await
    }

    /// # Errors
    ///
    /// `Validation` when the stay ends before it starts or the emergency
    /// contact is blank; otherwise the backend's rejection.
    pub async fn create(&mut self, mut booking: NewHotelBooking) -> Result<HotelBooking> {
        if booking.end_date < booking.start_date {
            return Err(DashboardError::validation("End date must not be before start date"));
        }
        booking.emergency_contact = require_text(&booking.emergency_contact, "Emergency contact is required")?;

        let created = self.client.create_hotel_booking(&booking).await?;
        self.reload().await?;
        Ok(created)
    }
}

#[async_trait]
impl Page for HotelPage {
    async fn reload(&mut self) -> Result<()> {
        let loaded = tokio::try_join!(
            self.client.fetch_all_hotel_bookings(0),
            self.client.fetch_pets(),
            self.client.fetch_users(),
            self.client.fetch_hotels(),
        );
        let (bookings, pets, users, hotels) =
            settle("hotel", "Failed to fetch data", &mut self.error, loaded)?;

        self.bookings = bookings;
        self.pets = pets;
        self.users = users;
        self.hotels = hotels;
        info!(bookings = self.bookings.len(), "hotel page loaded");
        Ok(())
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
#[path = "hotel_test.rs"]
mod tests;
