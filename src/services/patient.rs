// services/patient.rs
use crate::models::{
    CreateRendezVousRequest, Disponibilite, Docteur, Patient, PatientProfileUpdate, RendezVous,
    Specialite, VerificationDisponibilite, VerificationRequest,
};
use crate::app::session::SessionContext;
use crate::services::api::ApiClient;
use crate::utils::error::{AppError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::multipart::{Form, Part};
use serde_json::json;

/// Format des dates-heures locales échangées avec l'API
pub const DATE_HEURE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Services accessibles au patient : rendez-vous, annuaire, profil et créneaux
#[derive(Debug, Clone)]
pub struct PatientService {
    api: ApiClient,
}

impl PatientService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn session(&self) -> &SessionContext {
        self.api.session()
    }

    // Rendez-vous

    pub async fn my_appointments(&self, patient_id: i64) -> Result<Vec<RendezVous>> {
        self.api
            .get(&format!("/rendezvous/patient/{}", patient_id))
            .await
    }

    pub async fn book_appointment(&self, request: &CreateRendezVousRequest) -> Result<RendezVous> {
        self.api.post("/rendezvous", request).await
    }

    pub async fn cancel_appointment(&self, rendez_vous_id: i64, patient_id: i64) -> Result<()> {
        self.api
            .put_no_content(
                &format!("/rendezvous/{}/annuler?patientId={}", rendez_vous_id, patient_id),
                &json!({}),
            )
            .await
    }

    pub async fn confirm_appointment(&self, rendez_vous_id: i64, patient_id: i64) -> Result<()> {
        self.api
            .put_no_content(
                &format!("/rendezvous/{}/confirmer?patientId={}", rendez_vous_id, patient_id),
                &json!({}),
            )
            .await
    }

    // Annuaire des docteurs

    pub async fn all_doctors(&self) -> Result<Vec<Docteur>> {
        self.api.get("/docteurs").await
    }

    pub async fn doctors_by_specialty(&self, specialite_id: i64) -> Result<Vec<Docteur>> {
        self.api
            .get(&format!("/docteurs/specialite/{}", specialite_id))
            .await
    }

    pub async fn doctor(&self, docteur_id: i64) -> Result<Docteur> {
        self.api.get(&format!("/docteurs/{}", docteur_id)).await
    }

    pub async fn search_doctors(&self, query: &str) -> Result<Vec<Docteur>> {
        self.api
            .get(&format!("/docteurs/search?q={}", urlencoding::encode(query.trim())))
            .await
    }

    pub async fn specialties(&self) -> Result<Vec<Specialite>> {
        self.api.get("/specialites").await
    }

    // Profil

    pub async fn profile(&self, patient_id: i64) -> Result<Patient> {
        self.api.get(&format!("/patients/{}/profil", patient_id)).await
    }

    pub async fn update_profile(&self, patient_id: i64, update: &PatientProfileUpdate) -> Result<Patient> {
        self.api
            .put(&format!("/patients/{}/profil", patient_id), update)
            .await
    }

    /// Envoi de la photo de profil (multipart, champ `file`)
    pub async fn upload_photo(
        &self,
        patient_id: i64,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Patient> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|_| AppError::Validation(format!("Type de fichier invalide: {}", content_type)))?;
        let form = Form::new().part("file", part);

        self.api
            .post_multipart(&format!("/patients/{}/photo", patient_id), form)
            .await
    }

    // Créneaux

    /// Plages libres d'un docteur pour une date
    pub async fn available_slots(&self, docteur_id: i64, date: NaiveDate) -> Result<Vec<Disponibilite>> {
        self.api
            .get(&format!(
                "/disponibilites/docteur/{}/disponibles?date={}",
                docteur_id,
                date.format("%Y-%m-%d")
            ))
            .await
    }

    /// Vérification en direct d'un créneau précis
    pub async fn check_slot(&self, docteur_id: i64, date_heure: NaiveDateTime) -> Result<VerificationDisponibilite> {
        self.api
            .post(
                "/disponibilites/verifier",
                &VerificationRequest {
                    docteur_id,
                    date_heure,
                },
            )
            .await
    }

    /// Créneaux proposés à la place d'un créneau indisponible
    pub async fn suggested_slots(&self, docteur_id: i64, date_heure: NaiveDateTime) -> Result<Vec<NaiveDateTime>> {
        let formatted = date_heure.format(DATE_HEURE_FORMAT).to_string();
        self.api
            .get(&format!(
                "/disponibilites/docteur/{}/suggestions?dateHeure={}",
                docteur_id,
                urlencoding::encode(&formatted)
            ))
            .await
    }
}
