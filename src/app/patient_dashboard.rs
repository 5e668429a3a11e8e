// app/patient_dashboard.rs
use chrono::{Local, NaiveDateTime};
use tracing::warn;

use crate::app::scheduling::{is_past, patient_statistics};
use crate::models::{Docteur, RendezVous, StatistiquesPatient};
use crate::services::patient::PatientService;
use crate::utils::error::{AppError, Result};

/// Tableau de bord du patient : ses rendez-vous et l'annuaire des docteurs
pub struct PatientDashboard {
    service: PatientService,
    patient_id: i64,
    rendez_vous: Vec<RendezVous>,
    docteurs: Vec<Docteur>,
}

impl PatientDashboard {
    pub async fn mount(service: PatientService) -> Result<Self> {
        let patient_id = service.session().user_id().ok_or(AppError::NotLoggedIn)?;

        let mut dashboard = Self {
            service,
            patient_id,
            rendez_vous: Vec::new(),
            docteurs: Vec::new(),
        };
        dashboard.reload().await;

        Ok(dashboard)
    }

    /// Recharge les données ; un échec conserve la valeur précédente
    pub async fn reload(&mut self) {
        let (rendez_vous, docteurs) = tokio::join!(
            self.service.my_appointments(self.patient_id),
            self.service.all_doctors()
        );

        match rendez_vous {
            Ok(rendez_vous) => self.rendez_vous = rendez_vous,
            Err(e) => warn!("Erreur chargement rendez-vous: {}", e),
        }
        match docteurs {
            Ok(docteurs) => self.docteurs = docteurs,
            Err(e) => warn!("Erreur chargement docteurs: {}", e),
        }
    }

    pub fn patient_id(&self) -> i64 {
        self.patient_id
    }

    pub fn appointments(&self) -> &[RendezVous] {
        &self.rendez_vous
    }

    pub fn doctors(&self) -> &[Docteur] {
        &self.docteurs
    }

    /// Rendez-vous actifs à venir, du plus proche au plus lointain
    pub fn upcoming(&self, now: NaiveDateTime) -> Vec<&RendezVous> {
        let mut upcoming: Vec<&RendezVous> = self
            .rendez_vous
            .iter()
            .filter(|r| r.statut.is_active() && !is_past(r.date_heure, now))
            .collect();
        upcoming.sort_by_key(|r| r.date_heure);
        upcoming
    }

    pub fn statistics(&self) -> StatistiquesPatient {
        patient_statistics(&self.rendez_vous, Local::now().naive_local())
    }

    pub async fn cancel(&mut self, rendez_vous_id: i64) -> Result<()> {
        self.service
            .cancel_appointment(rendez_vous_id, self.patient_id)
            .await?;
        self.reload().await;
        Ok(())
    }

    pub async fn confirm(&mut self, rendez_vous_id: i64) -> Result<()> {
        self.service
            .confirm_appointment(rendez_vous_id, self.patient_id)
            .await?;
        self.reload().await;
        Ok(())
    }
}
