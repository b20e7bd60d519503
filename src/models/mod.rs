//! Typed record shapes for every backend resource.
//!
//! DESIGN
//! ======
//! The backend is loose about shapes: amounts arrive as numbers or decimal
//! strings, ids as numbers or strings, timestamps with or without an offset,
//! and most fields may be missing or null. Every record therefore decodes
//! leniently into optional fields, and every status enum carries an `Unknown`
//! catch-all so an unexpected value never fails a page load.

#[macro_use]
mod status;

pub mod booking;
pub mod de;
pub mod order;
pub mod people;
pub mod vet;

pub use booking::{
    AvailableSlot, BookingStatus, GroomingBooking, GroomingBookingUpdate, GroomingService, Hotel, HotelBooking,
    HotelBookingUpdate, NewGroomingBooking, NewHotelBooking,
};
pub use order::{Category, DeliveryAddress, Order, OrderItem, OrderStatus, Product};
pub use people::{Pet, User};
pub use vet::{
    Appointment, AppointmentStatus, ClinicService, MedicalRecord, MedicalRecordDraft, MedicalRecordUpdate,
    NewAppointment, NewRefillRequest, PartySummary, Prescription, PrescriptionDraft, PrescriptionUpdate,
    ProfilePicture, RefillEligibility, RefillRequest, RefillStatus, Veterinarian, VeterinarianForm,
};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
