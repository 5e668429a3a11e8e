// app/scheduling.rs
//! # Planification
//!
//! Outils partagés par la réservation et les tableaux de bord : grille de
//! créneaux, découpage des disponibilités et statistiques calculées
//! localement quand l'API ne les fournit pas.
//!
//! La grille par défaut n'est qu'un affichage de secours : un créneau qui en
//! est issu doit toujours être revérifié auprès du serveur avant réservation.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{Disponibilite, Patient, RendezVous, StatistiquesDocteur, StatistiquesPatient, StatutRendezVous};
use crate::utils::config::Config;
use crate::utils::error::{AppError, Result};

pub const SLOT_FORMAT: &str = "%H:%M";

/// Créneaux de `start` à `end` inclus, tous les `step`.
///
/// Vide si `start > end` ou si le pas n'est pas strictement positif. La
/// grille ne franchit jamais minuit.
pub fn generate_slot_grid(start: NaiveTime, end: NaiveTime, step: Duration) -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    if step <= Duration::zero() || start > end {
        return slots;
    }

    let mut current = start;
    loop {
        slots.push(current);
        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 || next > end {
            break;
        }
        current = next;
    }

    slots
}

/// Grille 09:00 - 18:00 par pas de 30 minutes
pub fn default_slot_grid() -> Vec<NaiveTime> {
    slot_grid_from_config(&Config::default())
}

pub fn slot_grid_from_config(config: &Config) -> Vec<NaiveTime> {
    generate_slot_grid(
        config.slot_day_start,
        config.slot_day_end,
        Duration::minutes(i64::from(config.slot_step_minutes)),
    )
}

/// Découpe les plages libres d'une date en heures de début de créneau.
///
/// Un créneau doit tenir entièrement dans sa plage. Résultat trié, sans doublon.
pub fn slots_from_availability(plages: &[Disponibilite], date: NaiveDate, step: Duration) -> Vec<NaiveTime> {
    if step <= Duration::zero() {
        return Vec::new();
    }

    let day_start = date.and_time(NaiveTime::default());
    let day_end = day_start + Duration::days(1);

    let mut slots: Vec<NaiveTime> = plages
        .iter()
        .filter(|p| p.disponible && p.covers_date(date))
        .flat_map(|plage| {
            let debut = plage.date_heure_debut.max(day_start);
            let fin = plage.date_heure_fin.min(day_end);
            let mut starts = Vec::new();
            let mut current = debut;
            while current + step <= fin {
                starts.push(current.time());
                current += step;
            }
            starts
        })
        .collect();

    slots.sort();
    slots.dedup();
    slots
}

pub fn format_slot(slot: NaiveTime) -> String {
    slot.format(SLOT_FORMAT).to_string()
}

pub fn parse_slot(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), SLOT_FORMAT)
        .map_err(|_| AppError::Validation(format!("Heure invalide: {}", raw)))
}

pub fn is_past(date_heure: NaiveDateTime, now: NaiveDateTime) -> bool {
    date_heure < now
}

/// Statistiques du docteur recalculées à partir de son agenda
pub fn doctor_statistics_fallback(rendez_vous: &[RendezVous], today: NaiveDate) -> StatistiquesDocteur {
    let same_month =
        |d: NaiveDate| d.year() == today.year() && d.month() == today.month();

    let rendez_vous_confirmes = rendez_vous
        .iter()
        .filter(|r| matches!(r.statut, StatutRendezVous::Confirme | StatutRendezVous::Termine))
        .count() as u64;

    // Patients dont le premier rendez-vous tombe dans le mois courant
    let nouveaux_patients = unique_patients(rendez_vous)
        .iter()
        .filter_map(|p| first_appointment_for(rendez_vous, p.personne.id))
        .filter(|r| same_month(r.date_heure.date()))
        .count() as u64;

    let revenu_mensuel: f64 = rendez_vous
        .iter()
        .filter(|r| r.statut == StatutRendezVous::Termine && same_month(r.date_heure.date()))
        .filter_map(|r| r.docteur.as_ref().and_then(|d| d.tarif_consultation))
        .sum();

    StatistiquesDocteur {
        total_rendez_vous: rendez_vous.len() as u64,
        rendez_vous_confirmes,
        nouveaux_patients,
        revenu_mensuel,
    }
}

/// Synthèse de l'agenda d'un patient
pub fn patient_statistics(rendez_vous: &[RendezVous], now: NaiveDateTime) -> StatistiquesPatient {
    let mut stats = StatistiquesPatient {
        total: rendez_vous.len() as u64,
        ..StatistiquesPatient::default()
    };

    for rdv in rendez_vous {
        if rdv.statut == StatutRendezVous::Annule {
            stats.annules += 1;
        } else if is_past(rdv.date_heure, now) {
            stats.passes += 1;
        } else if rdv.statut.is_active() {
            stats.a_venir += 1;
        }
    }

    stats
}

/// Patients distincts, dans l'ordre de première apparition
pub fn unique_patients(rendez_vous: &[RendezVous]) -> Vec<Patient> {
    let mut seen = HashSet::new();
    rendez_vous
        .iter()
        .filter_map(|r| r.patient.as_ref())
        .filter(|p| seen.insert(p.personne.id))
        .cloned()
        .collect()
}

/// Rendez-vous le plus récent d'un patient
pub fn last_appointment_for(rendez_vous: &[RendezVous], patient_id: i64) -> Option<&RendezVous> {
    rendez_vous
        .iter()
        .filter(|r| r.patient_id() == Some(patient_id))
        .max_by_key(|r| r.date_heure)
}

fn first_appointment_for(rendez_vous: &[RendezVous], patient_id: i64) -> Option<&RendezVous> {
    rendez_vous
        .iter()
        .filter(|r| r.patient_id() == Some(patient_id))
        .min_by_key(|r| r.date_heure)
}
