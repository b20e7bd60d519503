//! Prescriptions and their refill requests.

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use super::{Page, settle};
use crate::api::ApiClient;
use crate::display::{self, UNKNOWN};
use crate::error::Result;
use crate::models::{PartySummary, Prescription, PrescriptionUpdate, RefillStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrescriptionView {
    #[serde(flatten)]
    pub prescription: Prescription,
    pub customer_name: String,
    pub pet_name: String,
    pub has_pending_requests: bool,
}

impl From<Prescription> for PrescriptionView {
    fn from(prescription: Prescription) -> Self {
        let party_name = |party: Option<&PartySummary>| {
            display::text_or(party.and_then(|p| p.name.as_deref()), UNKNOWN).to_string()
        };
        Self {
            customer_name: party_name(prescription.owner.as_ref()),
            pet_name: party_name(prescription.pet.as_ref()),
            has_pending_requests: prescription.has_pending_requests(),
            prescription,
        }
    }
}

pub struct RefillsPage {
    client: ApiClient,
    prescriptions: Vec<PrescriptionView>,
    error: Option<String>,
}

impl RefillsPage {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client, prescriptions: Vec::new(), error: None }
    }

    #[must_use]
    pub fn prescriptions(&self) -> &[PrescriptionView] {
        &self.prescriptions
    }

    /// Prescriptions with at least one pending refill request.
    pub fn awaiting_review(&self) -> impl Iterator<Item = &PrescriptionView> {
        self.prescriptions.iter().filter(|p| p.has_pending_requests)
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn approve(&mut self, request_id: i64) -> Result<()> {
        self.decide(request_id, RefillStatus::Approved).await
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn deny(&mut self, request_id: i64) -> Result<()> {
        self.decide(request_id, RefillStatus::Denied).await
    }

    async fn decide(&mut self, request_id: i64, status: RefillStatus) -> Result<()> {
        self.client.update_refill_request(request_id, status).await?;
        self.reload().await
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn delete_request(&mut self, request_id: i64) -> Result<()> {
        self.client.delete_refill_request(request_id).await?;
        self.reload().await
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn edit_prescription(&mut self, prescription_id: i64, update: &PrescriptionUpdate) -> Result<()> {
        self.client.update_prescription(prescription_id, update).await?;
        self.reload().await
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn delete_prescription(&mut self, prescription_id: i64) -> Result<()> {
        self.client.delete_prescription(prescription_id).await?;
        self.reload().await
    }
}

#[async_trait]
impl Page for RefillsPage {
    async fn reload(&mut self) -> Result<()> {
        let loaded = self.client.fetch_prescriptions().await;
        let prescriptions = settle("refills", "Failed to load data", &mut self.error, loaded)?;
        self.prescriptions = prescriptions.into_iter().map(PrescriptionView::from).collect();
        info!(prescriptions = self.prescriptions.len(), "refills page loaded");
        Ok(())
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
#[path = "refills_test.rs"]
mod tests;
