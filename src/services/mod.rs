// services/mod.rs
pub mod api;
pub mod storage;
pub mod auth;
pub mod patient;
pub mod doctor;
pub mod admin;

// Ré-exports pour faciliter l'import
pub use api::ApiClient;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use auth::AuthService;
pub use patient::{PatientService, DATE_HEURE_FORMAT};
pub use doctor::DoctorService;
pub use admin::AdminService;
