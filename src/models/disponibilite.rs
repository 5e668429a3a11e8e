use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Plage de disponibilité d'un docteur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disponibilite {
    pub id: i64,
    pub date_heure_debut: NaiveDateTime,
    pub date_heure_fin: NaiveDateTime,
    #[serde(default = "default_disponible")]
    pub disponible: bool,
    #[serde(default)]
    pub motif_indisponibilite: Option<String>,
}

fn default_disponible() -> bool {
    true
}

impl Disponibilite {
    /// La plage touche-t-elle la date donnée ?
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.date_heure_debut.date() <= date && date <= self.date_heure_fin.date()
    }
}

/// Corps de `POST /disponibilites`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDisponibiliteRequest {
    pub date_heure_debut: NaiveDateTime,
    pub date_heure_fin: NaiveDateTime,
    pub docteur_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motif_indisponibilite: Option<String>,
}

/// Corps de `POST /disponibilites/verifier`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub docteur_id: i64,
    pub date_heure: NaiveDateTime,
}

/// Réponse de `POST /disponibilites/verifier`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDisponibilite {
    pub disponible: bool,
    #[serde(default)]
    pub message: Option<String>,
}
