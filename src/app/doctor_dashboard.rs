// app/doctor_dashboard.rs
use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::app::scheduling::{doctor_statistics_fallback, last_appointment_for, unique_patients};
use crate::models::{
    CreateDisponibiliteRequest, Disponibilite, Patient, RendezVous, StatistiquesDocteur,
    StatutRendezVous,
};
use crate::services::doctor::DoctorService;
use crate::utils::error::{AppError, Result};

/// Tableau de bord du docteur : agenda, disponibilités et statistiques
pub struct DoctorDashboard {
    service: DoctorService,
    docteur_id: i64,
    aujourdhui: Vec<RendezVous>,
    rendez_vous: Vec<RendezVous>,
    disponibilites: Vec<Disponibilite>,
    statistiques: StatistiquesDocteur,
}

impl DoctorDashboard {
    pub async fn mount(service: DoctorService) -> Result<Self> {
        let docteur_id = service.session().user_id().ok_or(AppError::NotLoggedIn)?;

        let mut dashboard = Self {
            service,
            docteur_id,
            aujourdhui: Vec::new(),
            rendez_vous: Vec::new(),
            disponibilites: Vec::new(),
            statistiques: StatistiquesDocteur::default(),
        };
        dashboard.reload().await;

        Ok(dashboard)
    }

    pub async fn reload(&mut self) {
        self.reload_as_of(Local::now().date_naive()).await;
    }

    /// Recharge tout ; les statistiques retombent sur un calcul local si
    /// l'API échoue
    pub async fn reload_as_of(&mut self, today: NaiveDate) {
        let id = self.docteur_id;
        let (aujourdhui, rendez_vous, disponibilites, statistiques) = tokio::join!(
            self.service.todays_appointments(id),
            self.service.my_appointments(id),
            self.service.my_availability(id),
            self.service.statistics(id)
        );

        match aujourdhui {
            Ok(list) => self.aujourdhui = list,
            Err(e) => warn!("Erreur chargement rendez-vous du jour: {}", e),
        }
        match rendez_vous {
            Ok(list) => self.rendez_vous = list,
            Err(e) => warn!("Erreur chargement rendez-vous: {}", e),
        }
        match disponibilites {
            Ok(list) => self.disponibilites = list,
            Err(e) => warn!("Erreur chargement disponibilités: {}", e),
        }
        self.statistiques = match statistiques {
            Ok(stats) => stats,
            Err(e) => {
                warn!("Erreur chargement statistiques, calcul local: {}", e);
                doctor_statistics_fallback(&self.rendez_vous, today)
            }
        };
    }

    pub fn docteur_id(&self) -> i64 {
        self.docteur_id
    }

    pub fn todays_appointments(&self) -> &[RendezVous] {
        &self.aujourdhui
    }

    pub fn appointments(&self) -> &[RendezVous] {
        &self.rendez_vous
    }

    pub fn availability(&self) -> &[Disponibilite] {
        &self.disponibilites
    }

    pub fn statistics(&self) -> &StatistiquesDocteur {
        &self.statistiques
    }

    pub fn unique_patients(&self) -> Vec<Patient> {
        unique_patients(&self.rendez_vous)
    }

    /// Dernier rendez-vous d'un patient chez ce docteur
    pub fn last_visit(&self, patient_id: i64) -> Option<&RendezVous> {
        last_appointment_for(&self.rendez_vous, patient_id)
    }

    async fn set_status(&mut self, rendez_vous_id: i64, statut: StatutRendezVous) -> Result<()> {
        self.service.update_status(rendez_vous_id, statut).await?;
        info!("Rendez-vous {} passé à {}", rendez_vous_id, statut);
        self.reload().await;
        Ok(())
    }

    pub async fn confirm(&mut self, rendez_vous_id: i64) -> Result<()> {
        self.set_status(rendez_vous_id, StatutRendezVous::Confirme).await
    }

    pub async fn complete(&mut self, rendez_vous_id: i64) -> Result<()> {
        self.set_status(rendez_vous_id, StatutRendezVous::Termine).await
    }

    pub async fn cancel(&mut self, rendez_vous_id: i64) -> Result<()> {
        self.set_status(rendez_vous_id, StatutRendezVous::Annule).await
    }

    pub async fn mark_absent(&mut self, rendez_vous_id: i64) -> Result<()> {
        self.set_status(rendez_vous_id, StatutRendezVous::Absent).await
    }

    /// Ajoute des notes ; des notes vides sont ignorées (renvoie `false`)
    pub async fn add_notes(&mut self, rendez_vous_id: i64, notes: &str) -> Result<bool> {
        if notes.trim().is_empty() {
            return Ok(false);
        }
        self.service.add_notes(rendez_vous_id, notes).await?;
        self.reload().await;
        Ok(true)
    }

    pub async fn add_availability(
        &mut self,
        debut: NaiveDateTime,
        fin: NaiveDateTime,
        motif_indisponibilite: Option<String>,
    ) -> Result<Disponibilite> {
        let disponibilite = self
            .service
            .add_availability(&CreateDisponibiliteRequest {
                date_heure_debut: debut,
                date_heure_fin: fin,
                docteur_id: self.docteur_id,
                motif_indisponibilite,
            })
            .await?;
        self.reload().await;
        Ok(disponibilite)
    }

    pub async fn remove_availability(&mut self, disponibilite_id: i64) -> Result<()> {
        self.service.remove_availability(disponibilite_id).await?;
        self.reload().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::test_utils::{logged_in_context, test_client};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn agenda() -> serde_json::Value {
        json!([
            {
                "id": 1, "dateHeure": "2026-10-02T09:00:00", "statut": "TERMINE", "motif": "Bilan",
                "patient": {"id": 4, "nom": "Durand", "prenom": "Alice"}
            },
            {
                "id": 2, "dateHeure": "2026-10-16T10:00:00", "statut": "CONFIRME", "motif": "Suivi",
                "patient": {"id": 5, "nom": "Petit", "prenom": "Jean"}
            },
            {
                "id": 3, "dateHeure": "2026-10-16T11:00:00", "statut": "PLANIFIE", "motif": "Contrôle",
                "patient": {"id": 4, "nom": "Durand", "prenom": "Alice"}
            }
        ])
    }

    async fn mount_agenda(server: &MockServer, statistiques: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/rendezvous/docteur/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(agenda()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rendezvous/docteur/7/today"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/disponibilites/docteur/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/docteurs/7/statistiques"))
            .respond_with(statistiques)
            .mount(server)
            .await;
    }

    fn service(uri: &str) -> DoctorService {
        DoctorService::new(test_client(uri, logged_in_context(Role::Docteur, 7)))
    }

    #[tokio::test]
    async fn test_statistics_from_api() {
        let server = MockServer::start().await;
        mount_agenda(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"totalRendezVous": 99})),
        )
        .await;

        let dashboard = DoctorDashboard::mount(service(&server.uri())).await.unwrap();
        assert_eq!(dashboard.statistics().total_rendez_vous, 99);
        assert_eq!(dashboard.appointments().len(), 3);
    }

    #[tokio::test]
    async fn test_statistics_fallback_to_local_computation() {
        let server = MockServer::start().await;
        mount_agenda(&server, ResponseTemplate::new(500)).await;

        let mut dashboard = DoctorDashboard::mount(service(&server.uri())).await.unwrap();
        dashboard
            .reload_as_of(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
            .await;

        let stats = dashboard.statistics();
        assert_eq!(stats.total_rendez_vous, 3);
        assert_eq!(stats.rendez_vous_confirmes, 2);
        assert_eq!(stats.nouveaux_patients, 2);
    }

    #[tokio::test]
    async fn test_patients_and_last_visit() {
        let server = MockServer::start().await;
        mount_agenda(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;

        let dashboard = DoctorDashboard::mount(service(&server.uri())).await.unwrap();
        let ids: Vec<i64> = dashboard
            .unique_patients()
            .iter()
            .map(|p| p.personne.id)
            .collect();
        assert_eq!(ids, vec![4, 5]);
        assert_eq!(dashboard.last_visit(4).map(|r| r.id), Some(3));
    }

    #[tokio::test]
    async fn test_status_mutations_reload() {
        let server = MockServer::start().await;
        mount_agenda(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;
        Mock::given(method("PUT"))
            .and(path("/rendezvous/3/statut"))
            .and(body_json(json!({"statut": "ABSENT"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/rendezvous/2/statut"))
            .and(body_json(json!({"statut": "TERMINE"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut dashboard = DoctorDashboard::mount(service(&server.uri())).await.unwrap();
        dashboard.mark_absent(3).await.unwrap();
        dashboard.complete(2).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let agenda_loads = requests
            .iter()
            .filter(|r| r.url.path() == "/rendezvous/docteur/7")
            .count();
        assert_eq!(agenda_loads, 3);
    }

    #[tokio::test]
    async fn test_blank_notes_are_ignored() {
        let server = MockServer::start().await;
        mount_agenda(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;
        Mock::given(method("PUT"))
            .and(path("/rendezvous/3/notes"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut dashboard = DoctorDashboard::mount(service(&server.uri())).await.unwrap();
        assert!(!dashboard.add_notes(3, "   ").await.unwrap());
        assert!(dashboard.add_notes(3, "Revoir dans un mois").await.unwrap());
    }

    #[tokio::test]
    async fn test_add_availability_uses_own_id() {
        let server = MockServer::start().await;
        mount_agenda(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;
        Mock::given(method("POST"))
            .and(path("/disponibilites"))
            .and(body_json(json!({
                "dateHeureDebut": "2026-10-22T09:00:00",
                "dateHeureFin": "2026-10-22T12:00:00",
                "docteurId": 7
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 40,
                "dateHeureDebut": "2026-10-22T09:00:00",
                "dateHeureFin": "2026-10-22T12:00:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let jour = NaiveDate::from_ymd_opt(2026, 10, 22).unwrap();
        let mut dashboard = DoctorDashboard::mount(service(&server.uri())).await.unwrap();
        let dispo = dashboard
            .add_availability(
                jour.and_hms_opt(9, 0, 0).unwrap(),
                jour.and_hms_opt(12, 0, 0).unwrap(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(dispo.id, 40);
    }
}
