//! Page-level data holders.
//!
//! DESIGN
//! ======
//! Each dashboard view owns one holder: the `ApiClient` it was handed, the
//! records it last fetched, and a page-level error message. `reload()` issues
//! the page's independent fetches jointly and replaces the data wholesale.
//! Mutating actions call the backend and then reload, so the holder always
//! mirrors backend state rather than patching itself locally.
//!
//! ERROR HANDLING
//! ==============
//! A failed reload sets `error`, keeps the previous data, and returns `Err`.
//! A failed action returns `Err` and leaves the page untouched; the caller
//! decides how to alert.

pub mod appointments;
pub mod grooming;
pub mod hotel;
pub mod medical_records;
pub mod orders;
pub mod refills;
pub mod veterinarians;

use async_trait::async_trait;
use tracing::error;

use crate::error::{DashboardError, Result};

pub use appointments::AppointmentsPage;
pub use grooming::GroomingPage;
pub use hotel::HotelPage;
pub use medical_records::MedicalRecordsPage;
pub use orders::OrdersPage;
pub use refills::RefillsPage;
pub use veterinarians::VeterinariansPage;

/// Common surface of every page holder.
#[async_trait]
pub trait Page: Send {
    /// Re-fetch everything the page shows.
    async fn reload(&mut self) -> Result<()>;

    /// Message from the last failed reload, cleared by a successful one.
    fn error(&self) -> Option<&str>;
}

/// Record a reload outcome on a page's error slot.
pub(crate) fn settle<T>(
    page: &'static str,
    prefix: &str,
    error_slot: &mut Option<String>,
    outcome: Result<T>,
) -> Result<T> {
    match outcome {
        Ok(value) => {
            *error_slot = None;
            Ok(value)
        }
        Err(e) => {
            error!(page, error = %e, "page reload failed");
            *error_slot = Some(format!("{prefix}: {e}"));
            Err(e)
        }
    }
}

/// Require a non-blank free-text value.
pub(crate) fn require_text(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::validation(message));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
