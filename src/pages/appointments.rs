//! Clinic appointments page.
//!
//! Appointments are enriched with pet and customer details fetched per record.
//! A failed lookup degrades to `N/A` for that record instead of failing the
//! page. Completed appointments accept a follow-up medical record or
//! prescription, routed to the pet's endpoint or the other-pet endpoint.

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use super::{Page, require_text, settle};
use crate::api::ApiClient;
use crate::display::{self, NOT_AVAILABLE, UNKNOWN_SERVICE};
use crate::error::{DashboardError, Result};
use crate::models::{
    Appointment, AppointmentStatus, ClinicService, MedicalRecordDraft, Pet, PrescriptionDraft, User, Veterinarian,
};

const DECLINE_REASON_REQUIRED: &str = "Please provide a reason for declining the appointment.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub pet_name: String,
    pub pet_species: String,
    pub pet_breed: String,
    pub service_name: String,
    pub scheduled_for: String,
    pub owner: Option<User>,
}

impl AppointmentView {
    /// Merge the lookups into display fields.
    ///
    /// Walk-in appointments without a registered pet show the other-pet
    /// species as the pet name.
    #[must_use]
    pub fn build(appointment: Appointment, pet: Option<Pet>, owner: Option<User>, services: &[ClinicService]) -> Self {
        let pet = pet.unwrap_or_default();
        let pet_name = if appointment.pet_id.is_some() {
            display::text_or_na(pet.name.as_deref()).to_string()
        } else {
            display::text_or_na(appointment.other_pet_species.as_deref()).to_string()
        };
        let pet_species = appointment
            .other_pet_species
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(pet.species.as_deref())
            .map_or_else(|| NOT_AVAILABLE.to_string(), str::to_string);
        let pet_breed = appointment
            .other_pet_breed
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(pet.breed.as_deref())
            .map_or_else(|| NOT_AVAILABLE.to_string(), str::to_string);
        let service_name = services
            .iter()
            .find(|s| Some(s.id) == appointment.service_id)
            .map_or(UNKNOWN_SERVICE, |s| display::text_or(s.name.as_deref(), UNKNOWN_SERVICE))
            .to_string();

        Self {
            scheduled_for: display::timestamp_or_na(appointment.date_time),
            appointment,
            pet_name,
            pet_species,
            pet_breed,
            service_name,
            owner,
        }
    }
}

pub struct AppointmentsPage {
    client: ApiClient,
    appointments: Vec<AppointmentView>,
    services: Vec<ClinicService>,
    veterinarians: Vec<Veterinarian>,
    error: Option<String>,
}

impl AppointmentsPage {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client, appointments: Vec::new(), services: Vec::new(), veterinarians: Vec::new(), error: None }
    }

    #[must_use]
    pub fn appointments(&self) -> &[AppointmentView] {
        &self.appointments
    }

    #[must_use]
    pub fn services(&self) -> &[ClinicService] {
        &self.services
    }

    #[must_use]
    pub fn veterinarians(&self) -> &[Veterinarian] {
        &self.veterinarians
    }

    fn find(&self, appointment_id: i64) -> Result<&Appointment> {
        self.appointments
            .iter()
            .map(|v| &v.appointment)
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| DashboardError::validation(format!("Appointment {appointment_id} is not loaded")))
    }

    /// Move an appointment one step along
    /// `SCHEDULED → CONFIRMED → IN_PROGRESS → COMPLETED`.
    ///
    /// # Errors
    ///
    /// `Validation` when the appointment is unknown or already terminal;
    /// otherwise the backend's rejection.
    pub async fn advance(&mut self, appointment_id: i64) -> Result<AppointmentStatus> {
        let current = self.find(appointment_id)?.status;
        let next = current.next().ok_or_else(|| {
            DashboardError::validation(format!("Appointment {appointment_id} cannot move on from {current}"))
        })?;
        self.set_status(appointment_id, next).await?;
        Ok(next)
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn set_status(&mut self, appointment_id: i64, status: AppointmentStatus) -> Result<()> {
        self.client.update_appointment_status(appointment_id, status).await?;
        self.reload().await
    }

    /// # Errors
    ///
    /// `Validation` for a blank reason; otherwise the backend's rejection.
    pub async fn decline(&mut self, appointment_id: i64, reason: &str) -> Result<()> {
        let reason = require_text(reason, DECLINE_REASON_REQUIRED)?;
        self.client.decline_appointment(appointment_id, &reason).await?;
        self.reload().await
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn delete(&mut self, appointment_id: i64) -> Result<()> {
        self.client.delete_appointment(appointment_id).await?;
        self.reload().await
    }

    /// Attach a medical record to a completed appointment.
    ///
    /// # Errors
    ///
    /// `Validation` when the appointment is not completed or the veterinarian
    /// is not one of the clinic's; otherwise the backend's rejection.
    pub async fn add_medical_record(&mut self, appointment_id: i64, mut draft: MedicalRecordDraft) -> Result<()> {
        let appointment = self.completed(appointment_id)?.clone();
        self.require_veterinarian(draft.veterinarian_id)?;

        match appointment.pet_id {
            Some(pet_id) => self.client.create_medical_record(pet_id, &draft).await?,
            None => {
                draft.other_pet_species = appointment.other_pet_species;
                draft.other_pet_breed = appointment.other_pet_breed;
                self.client.create_medical_record_for_other_pet(&draft).await?
            }
        };
        self.reload().await
    }

    /// Attach a prescription to a completed appointment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_medical_record`].
    pub async fn add_prescription(&mut self, appointment_id: i64, mut draft: PrescriptionDraft) -> Result<()> {
        let appointment = self.completed(appointment_id)?.clone();
        self.require_veterinarian(draft.veterinarian_id)?;

        match appointment.pet_id {
            Some(pet_id) => self.client.create_prescription(pet_id, &draft).await?,
            None => {
                draft.other_pet_species = appointment.other_pet_species;
                draft.other_pet_breed = appointment.other_pet_breed;
                self.client.create_prescription_for_other_pet(&draft).await?
            }
        };
        self.reload().await
    }

    fn completed(&self, appointment_id: i64) -> Result<&Appointment> {
        let appointment = self.find(appointment_id)?;
        if appointment.status != AppointmentStatus::Completed {
            return Err(DashboardError::validation(format!(
                "Appointment {appointment_id} must be completed first (status: {})",
                appointment.status
            )));
        }
        Ok(appointment)
    }

    fn require_veterinarian(&self, veterinarian_id: i64) -> Result<()> {
        if self.veterinarians.iter().any(|v| v.id == veterinarian_id) {
            Ok(())
        } else {
            Err(DashboardError::validation(format!("Unknown veterinarian id {veterinarian_id}")))
        }
    }
}

async fn lookup_pet(client: &ApiClient, pet_id: Option<i64>) -> Option<Pet> {
    let pet_id = pet_id?;
    match client.fetch_pet(pet_id).await {
        Ok(pet) => Some(pet),
        Err(e) => {
            warn!(pet_id, error = %e, "pet lookup failed");
            None
        }
    }
}

async fn lookup_user(client: &ApiClient, user_id: Option<i64>) -> Option<User> {
    let user_id = user_id?;
    match client.fetch_user(user_id).await {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(user_id, error = %e, "user lookup failed");
            None
        }
    }
}

#[async_trait]
impl Page for AppointmentsPage {
    async fn reload(&mut self) -> Result<()> {
        let loaded = tokio::try_join!(
            self.client.fetch_appointments(),
            self.client.fetch_clinic_services(),
            self.client.fetch_clinic_veterinarians(),
        );
        let (appointments, services, veterinarians) =
            settle("appointments", "Failed to load appointments", &mut self.error, loaded)?;

        let client = &self.client;
        let lookups = join_all(appointments.iter().map(|a| async move {
            tokio::join!(lookup_pet(client, a.pet_id), lookup_user(client, a.user_id))
        }))
        .await;

        self.appointments = appointments
            .into_iter()
            .zip(lookups)
            .map(|(appointment, (pet, owner))| AppointmentView::build(appointment, pet, owner, &services))
            .collect();
        self.services = services;
        self.veterinarians = veterinarians;
        info!(appointments = self.appointments.len(), "appointments page loaded");
        Ok(())
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
#[path = "appointments_test.rs"]
mod tests;
