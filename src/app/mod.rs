// app/mod.rs
pub mod session;
pub mod routes;
pub mod guards;
pub mod scheduling;
pub mod booking;
pub mod patient_dashboard;
pub mod doctor_dashboard;
pub mod admin_dashboard;

// Ré-exports pour faciliter l'import
pub use session::{decode_token, Session, SessionContext, TokenClaims};
pub use routes::{landing_route, redirect_after_login, Route};
pub use guards::{auth_guard, can_activate, role_guard, GuardDecision};
pub use scheduling::{
    default_slot_grid, doctor_statistics_fallback, format_slot, generate_slot_grid,
    last_appointment_for, parse_slot, patient_statistics, slot_grid_from_config,
    slots_from_availability, unique_patients,
};
pub use booking::{BookingFlow, BookingOutcome, SlotList, SlotSource};
pub use patient_dashboard::PatientDashboard;
pub use doctor_dashboard::DoctorDashboard;
pub use admin_dashboard::{AdminDashboard, StatusFilter};
