// utils/helpers.rs
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use uuid::Uuid;

const JOURS: [&str; 7] = ["lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche"];
const MOIS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin",
    "juillet", "août", "septembre", "octobre", "novembre", "décembre",
];

/// Générer un identifiant de corrélation pour une requête
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Formater une date longue en français ("vendredi 16 octobre 2026")
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {} {} {}",
        JOURS[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MOIS[date.month0() as usize],
        date.year()
    )
}

/// Formater l'heure d'un rendez-vous ("09:30")
pub fn format_heure(date_heure: &NaiveDateTime) -> String {
    format!("{:02}:{:02}", date_heure.hour(), date_heure.minute())
}

/// Formater une date relative au rendez-vous (dans X temps / il y a X temps)
pub fn format_relative_date(date_heure: &NaiveDateTime, now: &NaiveDateTime) -> String {
    let diff = *date_heure - *now;
    let (prefix, diff) = if diff < Duration::zero() {
        ("il y a", -diff)
    } else {
        ("dans", diff)
    };

    if diff.num_days() > 0 {
        format!("{} {} jour{}", prefix, diff.num_days(), if diff.num_days() > 1 { "s" } else { "" })
    } else if diff.num_hours() > 0 {
        format!("{} {} heure{}", prefix, diff.num_hours(), if diff.num_hours() > 1 { "s" } else { "" })
    } else if diff.num_minutes() > 0 {
        format!("{} {} minute{}", prefix, diff.num_minutes(), if diff.num_minutes() > 1 { "s" } else { "" })
    } else {
        "maintenant".to_string()
    }
}

/// Calculer l'âge d'un patient à une date donnée
pub fn calculate_age(date_naissance: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_naissance.year();
    if (today.month(), today.day()) < (date_naissance.month(), date_naissance.day()) {
        age -= 1;
    }
    age
}

/// Date minimale proposée par le formulaire de réservation
pub fn tomorrow(today: NaiveDate) -> NaiveDate {
    today.succ_opt().unwrap_or(today)
}

/// Limiter une chaîne de caractères
pub fn truncate_string(s: &str, max_length: usize) -> String {
    if s.chars().count() <= max_length {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
