//! Pet grooming endpoints under `/pet-grooming`.

use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::{ApiClient, text_form};
use crate::error::Result;
use crate::models::{AvailableSlot, GroomingBooking, GroomingBookingUpdate, GroomingService, NewGroomingBooking};

const BASE: &str = "/pet-grooming";

#[derive(Serialize)]
struct Page {
    skip: u32,
    limit: u32,
}

#[derive(Serialize)]
struct CancelBody<'a> {
    cancel_reason: &'a str,
}

impl ApiClient {
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_grooming_services(&self) -> Result<Vec<GroomingService>> {
        self.get_json(&format!("{BASE}/services")).await
    }

    /// One page of every grooming booking; `limit` is the configured page
    /// size.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_all_grooming_bookings(&self, skip: u32) -> Result<Vec<GroomingBooking>> {
        self.get_query(&format!("{BASE}/all-bookings"), &Page { skip, limit: self.page_limit }).await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_grooming_bookings_for_user(&self, user_id: i64) -> Result<Vec<GroomingBooking>> {
        self.get_query(&format!("{BASE}/bookings"), &[("user_id", user_id)]).await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn create_grooming_booking(&self, booking: &NewGroomingBooking) -> Result<GroomingBooking> {
        let form = text_form(booking.form_fields());
        let created: GroomingBooking = self.send_multipart(Method::POST, &format!("{BASE}/bookings"), form).await?;
        info!(booking_id = created.id, "grooming booking created");
        Ok(created)
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn update_grooming_booking(&self, booking_id: i64, update: &GroomingBookingUpdate) -> Result<Value> {
        let form = text_form(update.form_fields());
        let result = self.send_multipart(Method::PUT, &format!("{BASE}/bookings/{booking_id}"), form).await?;
        info!(booking_id, "grooming booking updated");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn delete_grooming_booking(&self, booking_id: i64) -> Result<()> {
        self.delete(&format!("{BASE}/bookings/{booking_id}")).await?;
        info!(booking_id, "grooming booking deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn accept_grooming_booking(&self, booking_id: i64) -> Result<Value> {
        let result = self.post_empty(&format!("{BASE}/bookings/{booking_id}/accept")).await?;
        info!(booking_id, "grooming booking accepted");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn decline_grooming_booking(&self, booking_id: i64, reason: &str) -> Result<Value> {
        let body = CancelBody { cancel_reason: reason };
        let result = self.post_json(&format!("{BASE}/bookings/{booking_id}/decline"), &body).await?;
        info!(booking_id, "grooming booking declined");
        Ok(result)
    }

    /// Slots the groomer still has open on `date`.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_available_slots(&self, date: NaiveDate) -> Result<Vec<AvailableSlot>> {
        self.get_query(&format!("{BASE}/available-slots"), &[("date", date.format("%Y-%m-%d").to_string())])
            .await
    }
}
