//! Veterinary clinic records: appointments, medical records, prescriptions,
//! refill requests and the clinic's veterinarians.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::de;

wire_status! {
    /// Appointment lifecycle. Forward steps run
    /// `SCHEDULED → CONFIRMED → IN_PROGRESS → COMPLETED`.
    AppointmentStatus {
        Scheduled => "SCHEDULED",
        Confirmed => "CONFIRMED",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Declined => "DECLINED",
        Cancelled => "CANCELLED",
    }
}

impl AppointmentStatus {
    /// The next forward step, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Scheduled => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            _ => None,
        }
    }
}

wire_status! {
    /// Refill request decision.
    RefillStatus {
        Pending => "PENDING",
        Approved => "APPROVED",
        Denied => "DENIED",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub pet_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub veterinarian_id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_timestamp")]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub other_pet_species: Option<String>,
    #[serde(default)]
    pub other_pet_breed: Option<String>,
    #[serde(default)]
    pub decline_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicService {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Appointment booked on behalf of a customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<i64>,
    pub user_id: i64,
    pub service_id: i64,
    pub date_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veterinarian_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_pet_species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_pet_breed: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: i64,
    #[serde(default)]
    pub pet_id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub veterinarian_id: Option<i64>,
    #[serde(default)]
    pub clinic_name: Option<String>,
}

/// New medical record written from a completed appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicalRecordDraft {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    pub description: String,
    pub veterinarian_id: i64,
    pub clinic_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_pet_species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_pet_breed: Option<String>,
}

/// Partial medical record edit; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MedicalRecordUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veterinarian_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_name: Option<String>,
}

/// Display-only summary nested in prescriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefillRequest {
    pub id: i64,
    #[serde(default)]
    pub prescription_id: Option<i64>,
    #[serde(default)]
    pub status: RefillStatus,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub request_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "de::opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i64,
    #[serde(default)]
    pub pet_id: Option<i64>,
    #[serde(default)]
    pub medication_name: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub veterinarian_id: Option<i64>,
    #[serde(default)]
    pub refill_status: Option<String>,
    #[serde(default)]
    pub owner: Option<PartySummary>,
    #[serde(default)]
    pub pet: Option<PartySummary>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub refill_requests: Vec<RefillRequest>,
}

impl Prescription {
    #[must_use]
    pub fn has_pending_requests(&self) -> bool {
        self.refill_requests.iter().any(|r| r.status == RefillStatus::Pending)
    }
}

/// Whether a prescription may be refilled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefillEligibility {
    #[default]
    Refillable,
    NonRefillable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrescriptionDraft {
    pub medication_name: String,
    pub dosage: String,
    pub instructions: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub veterinarian_id: i64,
    pub refill_status: RefillEligibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_pet_species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_pet_breed: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrescriptionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refill_status: Option<RefillEligibility>,
}

/// Refill request filed on a customer's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRefillRequest {
    pub prescription_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Veterinarian {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ProfilePicture {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ProfilePicture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilePicture")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Multipart veterinarian create/update form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VeterinarianForm {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub specialization: String,
    pub profile_picture: Option<ProfilePicture>,
}

impl VeterinarianForm {
    /// Text fields in submission order.
    #[must_use]
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone_number", self.phone_number.clone()),
            ("specialization", self.specialization.clone()),
        ]
    }
}
