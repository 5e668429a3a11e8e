// utils/mod.rs
pub mod error;
pub mod config;
pub mod validation;
pub mod helpers;

// Ré-exports pour faciliter l'import
pub use error::{AppError, AuthFailure, InvalidTokenError, Result, NETWORK_ERROR_MESSAGE};
pub use config::Config;
pub use validation::{
    validate_password, validate_password_match, validate_non_empty_string,
    validate_booking_date, validate_time_range, validate_object,
    MIN_MOTIF_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use helpers::{
    generate_request_id, format_date, format_heure, format_relative_date,
    calculate_age, tomorrow, truncate_string,
};
