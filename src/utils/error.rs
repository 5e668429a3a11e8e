// utils/error.rs
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Message générique affiché quand le serveur est injoignable (statut 0)
pub const NETWORK_ERROR_MESSAGE: &str = "Impossible de joindre le serveur. Vérifiez votre connexion.";

/// Échecs d'authentification/autorisation renvoyés par l'API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// 401 - jeton absent, invalide ou expiré côté serveur
    Unauthorized,
    /// 403 - rôle insuffisant
    Forbidden,
}

/// Raisons pour lesquelles un jeton stocké ne donne pas de session valide
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTokenError {
    #[error("No token stored")]
    Missing,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token expired at {0}")]
    Expired(DateTime<Utc>),

    #[error("Token carries no user id")]
    MissingUserId,

    #[error("Token carries no known role")]
    MissingRole,
}

#[derive(Error, Debug)]
pub enum AppError {
    // Erreurs réseau (statut 0)
    #[error("Network error: {0}")]
    Network(String),

    // Erreurs d'authentification (401/403)
    #[error("Authentication failed: {0:?}")]
    Auth(AuthFailure),

    // Erreurs de validation/métier (4xx avec message, ou formulaire local)
    #[error("Validation error: {0}")]
    Validation(String),

    // Erreurs serveur (5xx)
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    // Erreurs de session côté client
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] InvalidTokenError),

    #[error("User not logged in")]
    NotLoggedIn,

    // Erreurs de données
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Enveloppe d'erreur renvoyée par l'API : `{message}` ou `{error}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
    error: Option<String>,
}

impl AppError {
    /// Construit l'erreur correspondant à une réponse HTTP en échec
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => AppError::Auth(AuthFailure::Unauthorized),
            StatusCode::FORBIDDEN => AppError::Auth(AuthFailure::Forbidden),
            s if s.is_client_error() => AppError::Validation(
                extract_message(body).unwrap_or_else(|| "Requête invalide".to_string()),
            ),
            s => AppError::Server {
                status: s.as_u16(),
                message: extract_message(body).unwrap_or_else(|| "Erreur serveur".to_string()),
            },
        }
    }

    /// Vrai si l'erreur doit forcer la déconnexion
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::Auth(_) | AppError::InvalidToken(_) | AppError::NotLoggedIn)
    }

    /// Texte à présenter à l'utilisateur
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            AppError::Auth(AuthFailure::Unauthorized)
            | AppError::InvalidToken(_)
            | AppError::NotLoggedIn => "Session expirée, veuillez vous reconnecter".to_string(),
            AppError::Auth(AuthFailure::Forbidden) => "Accès refusé".to_string(),
            AppError::Validation(message) => message.clone(),
            AppError::Server { message, .. } => message.clone(),
            AppError::Parse(_) | AppError::Storage(_) | AppError::Config(_) => {
                "Une erreur inattendue est survenue".to_string()
            }
        }
    }
}

/// Extrait le message d'un corps d'erreur JSON ou texte brut
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(trimmed) {
        return envelope.message.or(envelope.error);
    }

    // Chaîne JSON (`"message"`) ou texte brut
    match serde_json::from_str::<String>(trimmed) {
        Ok(text) => Some(text),
        Err(_) => Some(trimmed.to_string()),
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::from_response(status, "")
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let error_messages: Vec<String> = errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect();
        messages.sort();

        AppError::Validation(messages.join("; "))
    }
}

// Type de résultat standard
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            AppError::from_response(StatusCode::UNAUTHORIZED, ""),
            AppError::Auth(AuthFailure::Unauthorized)
        ));
        assert!(matches!(
            AppError::from_response(StatusCode::FORBIDDEN, "{\"message\":\"non\"}"),
            AppError::Auth(AuthFailure::Forbidden)
        ));
        assert!(matches!(
            AppError::from_response(StatusCode::INTERNAL_SERVER_ERROR, ""),
            AppError::Server { status: 500, .. }
        ));
    }

    #[test]
    fn test_validation_message_extraction() {
        let err = AppError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Créneau déjà réservé"}"#,
        );
        assert_eq!(err.user_message(), "Créneau déjà réservé");

        let err = AppError::from_response(StatusCode::CONFLICT, r#"{"error":"Email déjà utilisé"}"#);
        assert_eq!(err.user_message(), "Email déjà utilisé");

        let err = AppError::from_response(StatusCode::BAD_REQUEST, "Mot de passe incorrect");
        assert_eq!(err.user_message(), "Mot de passe incorrect");

        let err = AppError::from_response(StatusCode::BAD_REQUEST, "\"Docteur introuvable\"");
        assert_eq!(err.user_message(), "Docteur introuvable");

        let err = AppError::from_response(StatusCode::BAD_REQUEST, "");
        assert_eq!(err.user_message(), "Requête invalide");
    }

    #[test]
    fn test_network_message_is_generic() {
        let err = AppError::Network("connection refused".to_string());
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
        assert!(!err.is_auth_failure());
    }
}
