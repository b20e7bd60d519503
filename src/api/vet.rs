//! Veterinary clinic endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::{ApiClient, text_form, with_file};
use crate::error::Result;
use crate::models::{
    Appointment, AppointmentStatus, ClinicService, MedicalRecord, MedicalRecordDraft, MedicalRecordUpdate,
    NewAppointment, NewRefillRequest, Prescription, PrescriptionDraft, PrescriptionUpdate, RefillRequest,
    RefillStatus, Veterinarian, VeterinarianForm, de,
};

/// A slot already taken on a given day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    #[serde(default, deserialize_with = "de::opt_timestamp")]
    pub date_time: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct StatusBody<S> {
    status: S,
}

#[derive(Serialize)]
struct DeclineBody<'a> {
    decline_reason: &'a str,
}

// =============================================================================
// APPOINTMENTS
// =============================================================================

impl ApiClient {
    /// Appointments visible to the logged-in clinic.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_appointments(&self) -> Result<Vec<Appointment>> {
        self.get_json("/appointments").await
    }

    /// Every appointment across clinics.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_all_appointments(&self) -> Result<Vec<Appointment>> {
        self.get_json("/appointments/all").await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_clinic_services(&self) -> Result<Vec<ClinicService>> {
        self.get_json("/appointments/services").await
    }

    /// Veterinarians selectable on appointments and records.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_clinic_veterinarians(&self) -> Result<Vec<Veterinarian>> {
        self.get_json("/appointments/veterinarians").await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_booked_appointments(&self, date: NaiveDate) -> Result<Vec<BookedSlot>> {
        self.get_query("/appointments/booked", &[("date", date.format("%Y-%m-%d").to_string())]).await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn create_appointment(&self, appointment: &NewAppointment) -> Result<Appointment> {
        let created: Appointment = self.post_json("/appointments/appointments", appointment).await?;
        info!(appointment_id = created.id, "appointment created");
        Ok(created)
    }

    /// Move `appointment_id` to `status`.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn update_appointment_status(&self, appointment_id: i64, status: AppointmentStatus) -> Result<Value> {
        let result = self.put_json(&format!("/appointments/{appointment_id}"), &StatusBody { status }).await?;
        info!(appointment_id, %status, "appointment status updated");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn delete_appointment(&self, appointment_id: i64) -> Result<()> {
        self.delete(&format!("/appointments/{appointment_id}")).await?;
        info!(appointment_id, "appointment deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn decline_appointment(&self, appointment_id: i64, reason: &str) -> Result<Value> {
        let body = DeclineBody { decline_reason: reason };
        let result = self.post_json(&format!("/appointments/{appointment_id}/decline"), &body).await?;
        info!(appointment_id, "appointment declined");
        Ok(result)
    }
}

// =============================================================================
// MEDICAL RECORDS
// =============================================================================

impl ApiClient {
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_all_medical_records(&self) -> Result<Vec<MedicalRecord>> {
        self.get_json("/pets/all-medical-records").await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_medical_records(&self, pet_id: i64) -> Result<Vec<MedicalRecord>> {
        self.get_json(&format!("/pets/{pet_id}/medical-records")).await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn create_medical_record(&self, pet_id: i64, draft: &MedicalRecordDraft) -> Result<Value> {
        let result = self.post_json(&format!("/pets/{pet_id}/medical-records"), draft).await?;
        info!(pet_id, "medical record created");
        Ok(result)
    }

    /// Record for a walk-in animal with no registered pet.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn create_medical_record_for_other_pet(&self, draft: &MedicalRecordDraft) -> Result<Value> {
        let result = self.post_json("/medical-records/other-pet", draft).await?;
        info!("medical record created for unregistered pet");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn update_medical_record(
        &self,
        pet_id: i64,
        record_id: i64,
        update: &MedicalRecordUpdate,
    ) -> Result<Value> {
        let result = self.put_json(&format!("/pets/{pet_id}/medical-records/{record_id}"), update).await?;
        info!(pet_id, record_id, "medical record updated");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn delete_medical_record(&self, pet_id: i64, record_id: i64) -> Result<()> {
        self.delete(&format!("/pets/{pet_id}/medical-records/{record_id}")).await?;
        info!(pet_id, record_id, "medical record deleted");
        Ok(())
    }
}

// =============================================================================
// PRESCRIPTIONS & REFILLS
// =============================================================================

impl ApiClient {
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_prescriptions(&self) -> Result<Vec<Prescription>> {
        self.get_json("/prescriptions").await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn create_prescription(&self, pet_id: i64, draft: &PrescriptionDraft) -> Result<Value> {
        let result = self.post_json(&format!("/prescriptions/{pet_id}"), draft).await?;
        info!(pet_id, "prescription created");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn create_prescription_for_other_pet(&self, draft: &PrescriptionDraft) -> Result<Value> {
        let result = self.post_json("/prescriptions/other-pet", draft).await?;
        info!("prescription created for unregistered pet");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn update_prescription(&self, prescription_id: i64, update: &PrescriptionUpdate) -> Result<Value> {
        let result = self.put_json(&format!("/prescriptions/{prescription_id}"), update).await?;
        info!(prescription_id, "prescription updated");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn delete_prescription(&self, prescription_id: i64) -> Result<()> {
        self.delete(&format!("/prescriptions/{prescription_id}")).await?;
        info!(prescription_id, "prescription deleted");
        Ok(())
    }

    /// Refill requests, for one prescription or across all of them.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_refill_requests(&self, prescription_id: Option<i64>) -> Result<Vec<RefillRequest>> {
        self.get_json(&refill_requests_path(prescription_id)).await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn create_refill_request(&self, request: &NewRefillRequest) -> Result<RefillRequest> {
        let created: RefillRequest = self.post_json("/prescriptions/refill/request", request).await?;
        info!(request_id = created.id, "refill request created");
        Ok(created)
    }

    /// Approve or deny a refill request.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn update_refill_request(&self, request_id: i64, status: RefillStatus) -> Result<Value> {
        let result =
            self.put_json(&format!("/prescriptions/refill/request/{request_id}"), &StatusBody { status }).await?;
        info!(request_id, %status, "refill request updated");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn delete_refill_request(&self, request_id: i64) -> Result<()> {
        self.delete(&format!("/prescriptions/refill/request/{request_id}")).await?;
        info!(request_id, "refill request deleted");
        Ok(())
    }
}

#[must_use]
pub fn refill_requests_path(prescription_id: Option<i64>) -> String {
    match prescription_id {
        Some(id) => format!("/prescriptions/{id}/refill-requests"),
        None => "/prescriptions/refill/requests".to_string(),
    }
}

// =============================================================================
// VETERINARIANS
// =============================================================================

impl ApiClient {
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_veterinarians(&self) -> Result<Vec<Veterinarian>> {
        self.get_json("/veterinarians").await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_veterinarian(&self, veterinarian_id: i64) -> Result<Veterinarian> {
        self.get_json(&format!("/veterinarians/{veterinarian_id}")).await
    }

    /// # Errors
    ///
    /// `Validation` for a bad picture MIME type, else any request failure.
    pub async fn create_veterinarian(&self, form: &VeterinarianForm) -> Result<Veterinarian> {
        let created: Veterinarian =
            self.send_multipart(Method::POST, "/veterinarians", veterinarian_multipart(form)?).await?;
        info!(veterinarian_id = created.id, "veterinarian created");
        Ok(created)
    }

    /// # Errors
    ///
    /// `Validation` for a bad picture MIME type, else any request failure.
    pub async fn update_veterinarian(&self, veterinarian_id: i64, form: &VeterinarianForm) -> Result<Veterinarian> {
        let path = format!("/veterinarians/{veterinarian_id}");
        let updated = self.send_multipart(Method::PUT, &path, veterinarian_multipart(form)?).await?;
        info!(veterinarian_id, "veterinarian updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn delete_veterinarian(&self, veterinarian_id: i64) -> Result<()> {
        self.delete(&format!("/veterinarians/{veterinarian_id}")).await?;
        info!(veterinarian_id, "veterinarian deleted");
        Ok(())
    }
}

fn veterinarian_multipart(form: &VeterinarianForm) -> Result<reqwest::multipart::Form> {
    let multipart = text_form(form.text_fields());
    match &form.profile_picture {
        Some(picture) => {
            with_file(multipart, "profile_picture", &picture.file_name, &picture.mime, picture.bytes.clone())
        }
        None => Ok(multipart),
    }
}
