// utils/validation.rs
use crate::utils::error::{AppError, Result};
use crate::utils::helpers::tomorrow;
use chrono::{NaiveDate, NaiveDateTime};
use validator::Validate;

/// Longueur minimale d'un mot de passe côté formulaire
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Longueur minimale du motif d'un rendez-vous
pub const MIN_MOTIF_LENGTH: usize = 10;

/// Valider un mot de passe
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Le mot de passe doit contenir au moins {} caractères",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Valider que la confirmation correspond au mot de passe
pub fn validate_password_match(password: &str, confirmation: &str) -> Result<()> {
    if password != confirmation {
        return Err(AppError::Validation("Les mots de passe ne correspondent pas".to_string()));
    }
    Ok(())
}

/// Valider une chaîne non vide
pub fn validate_non_empty_string(value: &str, field_name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} ne peut pas être vide", field_name)));
    }
    Ok(())
}

/// Valider une date de rendez-vous : au plus tôt le lendemain de `today`
pub fn validate_booking_date(date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date < tomorrow(today) {
        return Err(AppError::Validation(
            "La date du rendez-vous doit être au plus tôt demain".to_string(),
        ));
    }
    Ok(())
}

/// Valider un intervalle de disponibilité
pub fn validate_time_range(debut: NaiveDateTime, fin: NaiveDateTime) -> Result<()> {
    if fin <= debut {
        return Err(AppError::Validation(
            "La fin de la disponibilité doit être après son début".to_string(),
        ));
    }
    Ok(())
}

/// Fonction utilitaire pour valider un objet Validate
pub fn validate_object<T: Validate>(obj: &T) -> Result<()> {
    obj.validate().map_err(AppError::from)
}
