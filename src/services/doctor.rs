// services/doctor.rs
use crate::models::{
    CreateDisponibiliteRequest, Disponibilite, Docteur, DocteurProfileUpdate, NotesUpdate,
    RendezVous, StatistiquesDocteur, StatutRendezVous, StatutUpdate,
};
use crate::app::session::SessionContext;
use crate::services::api::ApiClient;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_time_range};

/// Services du docteur : agenda, disponibilités, statistiques et profil
#[derive(Debug, Clone)]
pub struct DoctorService {
    api: ApiClient,
}

impl DoctorService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn session(&self) -> &SessionContext {
        self.api.session()
    }

    pub async fn my_appointments(&self, docteur_id: i64) -> Result<Vec<RendezVous>> {
        self.api
            .get(&format!("/rendezvous/docteur/{}", docteur_id))
            .await
    }

    pub async fn todays_appointments(&self, docteur_id: i64) -> Result<Vec<RendezVous>> {
        self.api
            .get(&format!("/rendezvous/docteur/{}/today", docteur_id))
            .await
    }

    pub async fn update_status(&self, rendez_vous_id: i64, statut: StatutRendezVous) -> Result<()> {
        self.api
            .put_no_content(
                &format!("/rendezvous/{}/statut", rendez_vous_id),
                &StatutUpdate { statut },
            )
            .await
    }

    pub async fn add_notes(&self, rendez_vous_id: i64, notes: &str) -> Result<()> {
        validate_non_empty_string(notes, "Les notes")?;
        self.api
            .put_no_content(
                &format!("/rendezvous/{}/notes", rendez_vous_id),
                &NotesUpdate {
                    notes: notes.trim().to_string(),
                },
            )
            .await
    }

    // Disponibilités

    pub async fn my_availability(&self, docteur_id: i64) -> Result<Vec<Disponibilite>> {
        self.api
            .get(&format!("/disponibilites/docteur/{}", docteur_id))
            .await
    }

    pub async fn add_availability(&self, request: &CreateDisponibiliteRequest) -> Result<Disponibilite> {
        validate_time_range(request.date_heure_debut, request.date_heure_fin)?;
        self.api.post("/disponibilites", request).await
    }

    pub async fn remove_availability(&self, disponibilite_id: i64) -> Result<()> {
        self.api
            .delete(&format!("/disponibilites/{}", disponibilite_id))
            .await
    }

    pub async fn statistics(&self, docteur_id: i64) -> Result<StatistiquesDocteur> {
        self.api
            .get(&format!("/docteurs/{}/statistiques", docteur_id))
            .await
    }

    // Profil

    pub async fn profile(&self, docteur_id: i64) -> Result<Docteur> {
        self.api.get(&format!("/docteurs/{}", docteur_id)).await
    }

    pub async fn update_profile(&self, docteur_id: i64, update: &DocteurProfileUpdate) -> Result<Docteur> {
        self.api
            .put(&format!("/docteurs/{}", docteur_id), update)
            .await
    }
}
