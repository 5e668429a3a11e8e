use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::models::user::{Docteur, Patient};

/// État d'un rendez-vous
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatutRendezVous {
    Planifie,   // Créé par le patient, en attente
    Confirme,   // Confirmé par le docteur ou le patient
    Annule,     // Annulé
    Termine,    // Consultation effectuée
    Absent,     // Patient absent
}

impl StatutRendezVous {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatutRendezVous::Planifie => "PLANIFIE",
            StatutRendezVous::Confirme => "CONFIRME",
            StatutRendezVous::Annule => "ANNULE",
            StatutRendezVous::Termine => "TERMINE",
            StatutRendezVous::Absent => "ABSENT",
        }
    }

    /// Un rendez-vous encore susceptible d'avoir lieu
    pub fn is_active(&self) -> bool {
        matches!(self, StatutRendezVous::Planifie | StatutRendezVous::Confirme)
    }
}

impl fmt::Display for StatutRendezVous {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Un rendez-vous
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RendezVous {
    pub id: i64,
    pub date_heure: NaiveDateTime,
    pub statut: StatutRendezVous,
    #[serde(default)]
    pub motif: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub date_creation: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_modification: Option<NaiveDateTime>,
    #[serde(default)]
    pub patient: Option<Patient>,
    #[serde(default)]
    pub docteur: Option<Docteur>,
}

impl RendezVous {
    pub fn patient_id(&self) -> Option<i64> {
        self.patient.as_ref().map(|p| p.personne.id)
    }
}

/// Corps de `POST /rendezvous`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRendezVousRequest {
    pub date_heure: NaiveDateTime,
    pub motif: String,
    pub patient_id: i64,
    pub docteur_id: i64,
}

/// Saisie du formulaire de réservation
#[derive(Debug, Clone, Validate)]
pub struct BookingForm {
    pub heure: NaiveTime,

    #[validate(length(min = 10, message = "Le motif doit contenir au moins 10 caractères"))]
    pub motif: String,
}

impl BookingForm {
    pub fn date_heure(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.heure)
    }
}

/// Corps de `PUT /rendezvous/{id}/statut`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatutUpdate {
    pub statut: StatutRendezVous,
}

/// Corps de `PUT /rendezvous/{id}/notes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesUpdate {
    pub notes: String,
}
