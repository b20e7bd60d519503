//! Clinic-wide medical records.
//!
//! Each record is joined with its pet, the pet's owner and the attending
//! veterinarian. Unlike appointments, a failed lookup fails the whole reload.

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Serialize;
use tracing::info;

use super::{Page, settle};
use crate::api::ApiClient;
use crate::display::{self, NOT_AVAILABLE};
use crate::error::Result;
use crate::models::{MedicalRecord, MedicalRecordUpdate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicalRecordView {
    #[serde(flatten)]
    pub record: MedicalRecord,
    pub pet_name: String,
    pub customer_name: String,
    pub veterinarian_name: String,
}

pub struct MedicalRecordsPage {
    client: ApiClient,
    records: Vec<MedicalRecordView>,
    error: Option<String>,
}

impl MedicalRecordsPage {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client, records: Vec::new(), error: None }
    }

    #[must_use]
    pub fn records(&self) -> &[MedicalRecordView] {
        &self.records
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn update(&mut self, pet_id: i64, record_id: i64, update: &MedicalRecordUpdate) -> Result<()> {
        self.client.update_medical_record(pet_id, record_id, update).await?;
        self.reload().await
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn delete(&mut self, pet_id: i64, record_id: i64) -> Result<()> {
        self.client.delete_medical_record(pet_id, record_id).await?;
        self.reload().await
    }
}

async fn enrich(client: &ApiClient, record: MedicalRecord) -> Result<MedicalRecordView> {
    let pet = match record.pet_id {
        Some(pet_id) => Some(client.fetch_pet(pet_id).await?),
        None => None,
    };
    let owner = match pet.as_ref().and_then(|p| p.owner_id) {
        Some(owner_id) => Some(client.fetch_user(owner_id).await?),
        None => None,
    };
    let veterinarian = match record.veterinarian_id {
        Some(veterinarian_id) => Some(client.fetch_veterinarian(veterinarian_id).await?),
        None => None,
    };

    Ok(MedicalRecordView {
        pet_name: display::text_or_na(pet.as_ref().and_then(|p| p.name.as_deref())).to_string(),
        customer_name: display::text_or_na(owner.as_ref().and_then(|u| u.name.as_deref())).to_string(),
        veterinarian_name: veterinarian
            .as_ref()
            .and_then(|v| v.name.as_deref())
            .map_or_else(|| NOT_AVAILABLE.to_string(), str::to_string),
        record,
    })
}

#[async_trait]
impl Page for MedicalRecordsPage {
    async fn reload(&mut self) -> Result<()> {
        let client = &self.client;
        let loaded: Result<Vec<MedicalRecordView>> = async {
            let records = client.fetch_all_medical_records().await?;
            try_join_all(records.into_iter().map(|record| enrich(client, record))).await
        }
        .await;
        self.records = settle("medical_records", "Failed to load data", &mut self.error, loaded)?;
        info!(records = self.records.len(), "medical records page loaded");
        Ok(())
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
#[path = "medical_records_test.rs"]
mod tests;
