use serde::{Deserialize, Serialize};

/// Statistiques globales du tableau de bord administrateur
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatistiquesGlobales {
    pub total_utilisateurs: u64,
    pub total_patients: u64,
    pub total_docteurs: u64,
    pub total_rendez_vous: u64,
    pub rendez_vous_aujourdhui: u64,
    pub revenu_mensuel: f64,
    pub taux_occupation: f64,
}

/// Statistiques d'un docteur (`GET /docteurs/{id}/statistiques`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatistiquesDocteur {
    pub total_rendez_vous: u64,
    pub rendez_vous_confirmes: u64,
    pub nouveaux_patients: u64,
    pub revenu_mensuel: f64,
}

/// Synthèse calculée localement pour le tableau de bord patient
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatistiquesPatient {
    pub total: u64,
    pub a_venir: u64,
    pub passes: u64,
    pub annules: u64,
}

/// Rapport mensuel : format libre défini par le serveur
pub type RapportMensuel = serde_json::Value;

/// Entrée du journal d'activité : format libre défini par le serveur
pub type LogActivite = serde_json::Value;
