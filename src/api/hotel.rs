//! Pet hotel endpoints under `/pet-hotels`.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::ApiClient;
use crate::error::Result;
use crate::models::{Hotel, HotelBooking, HotelBookingUpdate, NewHotelBooking};

const BASE: &str = "/pet-hotels";

#[derive(Serialize)]
struct Page {
    skip: u32,
    limit: u32,
}

#[derive(Serialize)]
struct ReasonBody<'a> {
    reason: &'a str,
}

impl ApiClient {
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_hotels(&self) -> Result<Vec<Hotel>> {
        self.get_json(BASE).await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_all_hotel_bookings(&self, skip: u32) -> Result<Vec<HotelBooking>> {
        self.get_query(&format!("{BASE}/bookings/all"), &Page { skip, limit: self.page_limit }).await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_hotel_bookings_for_user(&self, user_id: i64) -> Result<Vec<HotelBooking>> {
        self.get_query(&format!("{BASE}/bookings"), &[("user_id", user_id)]).await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn create_hotel_booking(&self, booking: &NewHotelBooking) -> Result<HotelBooking> {
        let created: HotelBooking = self.post_json(&format!("{BASE}/bookings"), booking).await?;
        info!(booking_id = created.id, "hotel booking created");
        Ok(created)
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn update_hotel_booking(&self, booking_id: i64, update: &HotelBookingUpdate) -> Result<Value> {
        let result = self.put_json(&format!("{BASE}/bookings/{booking_id}"), update).await?;
        info!(booking_id, "hotel booking updated");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn delete_hotel_booking(&self, booking_id: i64) -> Result<()> {
        self.delete(&format!("{BASE}/bookings/{booking_id}")).await?;
        info!(booking_id, "hotel booking deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn accept_hotel_booking(&self, booking_id: i64) -> Result<Value> {
        let result = self.post_empty(&format!("{BASE}/bookings/{booking_id}/accept")).await?;
        info!(booking_id, "hotel booking accepted");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn decline_hotel_booking(&self, booking_id: i64, reason: &str) -> Result<Value> {
        let result = self.post_json(&format!("{BASE}/bookings/{booking_id}/decline"), &ReasonBody { reason }).await?;
        info!(booking_id, "hotel booking declined");
        Ok(result)
    }
}
