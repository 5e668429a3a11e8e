// src/lib.rs
// Modules principaux
pub mod models;
pub mod app;
pub mod services;
pub mod utils;

// Ré-exports pour faciliter l'utilisation
pub use models::*;
pub use app::*;
pub use services::*;
pub use utils::*;

// Version de l'application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "DocTime";

// Types communs
pub use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
pub use validator::Validate;

/// Services prêts à l'emploi, partageant la même session
#[derive(Debug, Clone)]
pub struct Clients {
    pub session: SessionContext,
    pub auth: AuthService,
    pub patient: PatientService,
    pub doctor: DoctorService,
    pub admin: AdminService,
}

impl Clients {
    pub fn new(config: &Config, session: SessionContext) -> Result<Self> {
        let api = ApiClient::new(config, session.clone())?;
        Ok(Self {
            session,
            auth: AuthService::new(api.clone()),
            patient: PatientService::new(api.clone()),
            doctor: DoctorService::new(api.clone()),
            admin: AdminService::new(api),
        })
    }

    /// Session lue depuis `SESSION_FILE` si configuré
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config, SessionContext::from_config(config)?)
    }
}

// Outils partagés par les tests unitaires
#[cfg(test)]
pub mod test_utils {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};
    use std::sync::Once;

    static INIT: Once = Once::new();

    pub fn init_test_logging() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter("doctime_client=debug")
                .try_init();
        });
    }

    /// Jeton signé avec une clé de test, expirant dans `expires_in` secondes
    pub fn make_token(role: Option<&str>, user_id: Option<i64>, expires_in: i64) -> String {
        let mut claims = json!({
            "sub": "patient@doctime.fr",
            "exp": chrono::Utc::now().timestamp() + expires_in,
        });
        if let Some(role) = role {
            claims["role"] = json!(role);
        }
        if let Some(user_id) = user_id {
            claims["userId"] = json!(user_id);
        }

        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test"))
            .expect("encodage du jeton de test")
    }

    pub fn login_response(token: String, role: Option<Role>, user_id: Option<i64>) -> LoginResponse {
        LoginResponse {
            token,
            role,
            user_id,
            message: None,
        }
    }

    /// Session valide pendant une heure
    pub fn logged_in_context(role: Role, user_id: i64) -> SessionContext {
        let session = SessionContext::in_memory();
        session
            .open(&login_response(
                make_token(Some(role.as_str()), Some(user_id), 3600),
                Some(role),
                Some(user_id),
            ))
            .expect("ouverture de la session de test");
        session
    }

    pub fn test_client(uri: &str, session: SessionContext) -> ApiClient {
        let config = Config {
            http_timeout_seconds: 5,
            ..Config::with_api_url(uri)
        };
        ApiClient::new(&config, session).expect("client de test")
    }

    pub fn docteur(id: i64, nom: &str, prenom: &str, specialite: &str) -> Value {
        json!({
            "id": id,
            "nom": nom,
            "prenom": prenom,
            "email": format!("{}@doctime.fr", nom.to_lowercase()),
            "specialite": {"id": id * 10, "titre": specialite}
        })
    }

    pub fn rendez_vous(
        id: i64,
        patient_id: i64,
        date_heure: NaiveDateTime,
        statut: StatutRendezVous,
    ) -> RendezVous {
        serde_json::from_value(json!({
            "id": id,
            "dateHeure": date_heure,
            "statut": statut,
            "motif": "Consultation de suivi",
            "patient": {"id": patient_id, "nom": "Patient", "prenom": format!("N{}", patient_id)},
            "docteur": {"id": 7, "nom": "Martin", "prenom": "Paul"}
        }))
        .expect("rendez-vous de test")
    }
}
