// app/booking.rs
//! # Réservation
//!
//! Parcours de prise de rendez-vous : choix du docteur, de la date, puis du
//! créneau. Le créneau choisi est toujours revérifié auprès du serveur avant
//! la création ; un créneau refusé renvoie des suggestions et n'appelle jamais
//! la création. Aucun verrou n'est posé entre vérification et création : un
//! conflit tardif remonte tel quel depuis le serveur.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{info, warn};

use crate::app::scheduling::{slot_grid_from_config, slots_from_availability};
use crate::models::{BookingForm, CreateRendezVousRequest, Docteur, RendezVous};
use crate::services::patient::PatientService;
use crate::utils::config::Config;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_booking_date, validate_object};

/// Origine des créneaux affichés
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSource {
    /// Calculés à partir des disponibilités renvoyées par le serveur
    Live,
    /// Grille par défaut, le serveur n'ayant pas répondu
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotList {
    pub slots: Vec<NaiveTime>,
    pub source: SlotSource,
}

impl SlotList {
    fn empty() -> Self {
        Self {
            slots: Vec::new(),
            source: SlotSource::Live,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Booked(RendezVous),
    Unavailable {
        message: Option<String>,
        suggestions: Vec<NaiveDateTime>,
    },
}

pub struct BookingFlow {
    service: PatientService,
    patient_id: i64,
    slot_step: Duration,
    fallback_grid: Vec<NaiveTime>,
    docteurs: Vec<Docteur>,
    filtered: Vec<Docteur>,
    selected_doctor: Option<Docteur>,
    selected_date: Option<NaiveDate>,
    slots: SlotList,
    suggestions: Vec<NaiveDateTime>,
}

impl BookingFlow {
    /// Démarre le parcours pour le patient connecté
    pub fn start(service: PatientService, config: &Config) -> Result<Self> {
        let patient_id = service.session().user_id().ok_or(AppError::NotLoggedIn)?;

        Ok(Self {
            service,
            patient_id,
            slot_step: Duration::minutes(i64::from(config.slot_step_minutes)),
            fallback_grid: slot_grid_from_config(config),
            docteurs: Vec::new(),
            filtered: Vec::new(),
            selected_doctor: None,
            selected_date: None,
            slots: SlotList::empty(),
            suggestions: Vec::new(),
        })
    }

    pub fn patient_id(&self) -> i64 {
        self.patient_id
    }

    pub async fn load_doctors(&mut self) -> Result<()> {
        match self.service.all_doctors().await {
            Ok(docteurs) => {
                self.filtered = docteurs.clone();
                self.docteurs = docteurs;
                Ok(())
            }
            Err(e) => {
                warn!("Erreur chargement docteurs: {}", e);
                Err(e)
            }
        }
    }

    /// Docteurs correspondant au dernier filtre
    pub fn doctors(&self) -> &[Docteur] {
        &self.filtered
    }

    /// Filtre sur nom, prénom ou spécialité, insensible à la casse
    pub fn filter_doctors(&mut self, term: &str) {
        self.filtered = self
            .docteurs
            .iter()
            .filter(|d| d.matches(term))
            .cloned()
            .collect();
    }

    /// Sélection depuis un lien `?docteurId=` ; faux si le docteur est inconnu
    pub async fn preselect_doctor(&mut self, docteur_id: i64) -> bool {
        let Some(docteur) = self
            .docteurs
            .iter()
            .find(|d| d.personne.id == docteur_id)
            .cloned()
        else {
            warn!("Docteur {} introuvable pour la présélection", docteur_id);
            return false;
        };

        self.select_doctor(docteur).await;
        true
    }

    pub async fn select_doctor(&mut self, docteur: Docteur) {
        self.selected_doctor = Some(docteur);
        self.suggestions.clear();
        self.refresh_slots().await;
    }

    pub async fn select_date(&mut self, date: NaiveDate) -> Result<()> {
        self.select_date_as_of(date, Local::now().date_naive()).await
    }

    /// Sélection de la date, au plus tôt le lendemain de `today`
    pub async fn select_date_as_of(&mut self, date: NaiveDate, today: NaiveDate) -> Result<()> {
        validate_booking_date(date, today)?;
        self.selected_date = Some(date);
        self.suggestions.clear();
        self.refresh_slots().await;
        Ok(())
    }

    /// Recharge les créneaux du docteur et de la date choisis.
    ///
    /// En cas d'échec, la grille par défaut est affichée avec
    /// `SlotSource::Fallback`.
    pub async fn refresh_slots(&mut self) -> &SlotList {
        let (Some(docteur), Some(date)) = (self.selected_doctor.as_ref(), self.selected_date) else {
            self.slots = SlotList::empty();
            return &self.slots;
        };

        self.slots = match self.service.available_slots(docteur.personne.id, date).await {
            Ok(plages) => SlotList {
                slots: slots_from_availability(&plages, date, self.slot_step),
                source: SlotSource::Live,
            },
            Err(e) => {
                warn!(
                    "⚠️  Créneaux indisponibles pour le docteur {} ({}), grille par défaut affichée",
                    docteur.personne.id, e
                );
                SlotList {
                    slots: self.fallback_grid.clone(),
                    source: SlotSource::Fallback,
                }
            }
        };

        &self.slots
    }

    pub fn slots(&self) -> &SlotList {
        &self.slots
    }

    pub fn suggestions(&self) -> &[NaiveDateTime] {
        &self.suggestions
    }

    pub fn selected_doctor(&self) -> Option<&Docteur> {
        self.selected_doctor.as_ref()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Reprend une suggestion : la date change, l'heure est renvoyée au formulaire
    pub async fn choose_suggestion(&mut self, suggestion: NaiveDateTime) -> NaiveTime {
        if self.selected_date != Some(suggestion.date()) {
            self.selected_date = Some(suggestion.date());
            self.refresh_slots().await;
        }
        suggestion.time()
    }

    /// Vérifie le créneau auprès du serveur puis crée le rendez-vous
    pub async fn submit(&mut self, form: &BookingForm) -> Result<BookingOutcome> {
        validate_object(form)?;

        let docteur_id = self
            .selected_doctor
            .as_ref()
            .map(|d| d.personne.id)
            .ok_or_else(|| AppError::Validation("Veuillez choisir un docteur".to_string()))?;
        let date = self
            .selected_date
            .ok_or_else(|| AppError::Validation("Veuillez choisir une date".to_string()))?;
        let date_heure = form.date_heure(date);

        let verification = self.service.check_slot(docteur_id, date_heure).await?;
        if !verification.disponible {
            info!("Créneau {} refusé pour le docteur {}", date_heure, docteur_id);

            self.suggestions = self
                .service
                .suggested_slots(docteur_id, date_heure)
                .await
                .unwrap_or_else(|e| {
                    warn!("Erreur chargement suggestions: {}", e);
                    Vec::new()
                });

            return Ok(BookingOutcome::Unavailable {
                message: verification.message,
                suggestions: self.suggestions.clone(),
            });
        }

        let rendez_vous = self
            .service
            .book_appointment(&CreateRendezVousRequest {
                date_heure,
                motif: form.motif.trim().to_string(),
                patient_id: self.patient_id,
                docteur_id,
            })
            .await?;

        self.suggestions.clear();
        info!("📅 Rendez-vous {} créé pour le {}", rendez_vous.id, date_heure);

        Ok(BookingOutcome::Booked(rendez_vous))
    }
}
