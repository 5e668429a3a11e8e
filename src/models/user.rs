use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Rôle d'un compte DocTime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Docteur,
    Admin,
}

impl Role {
    /// Valeur transmise par l'API
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "PATIENT",
            Role::Docteur => "DOCTEUR",
            Role::Admin => "ADMIN",
        }
    }

    /// Rôles proposés à l'inscription publique
    pub fn can_self_register(&self) -> bool {
        matches!(self, Role::Patient | Role::Docteur)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PATIENT" => Ok(Role::Patient),
            "DOCTEUR" => Ok(Role::Docteur),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// Rôle inconnu ou absent => None
pub(crate) fn deserialize_role_lenient<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.parse().ok()))
}

/// Identité commune à tous les comptes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personne {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

impl Personne {
    pub fn nom_complet(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }
}

/// Compte utilisateur tel que renvoyé par l'API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub personne: Personne,
    pub role: Role,
    #[serde(default = "default_actif")]
    pub actif: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
    #[serde(default)]
    pub date_creation: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_modification: Option<NaiveDateTime>,
}

fn default_actif() -> bool {
    true
}

/// Patient : identité + dossier médical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(flatten)]
    pub personne: Personne,
    #[serde(default)]
    pub date_naissance: Option<NaiveDate>,
    #[serde(default)]
    pub groupe_sanguin: Option<String>,
    #[serde(default)]
    pub antecedents_medicaux: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Spécialité médicale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialite {
    pub id: i64,
    pub titre: String,
    #[serde(default)]
    pub description: String,
}

/// Docteur : identité + informations professionnelles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Docteur {
    #[serde(flatten)]
    pub personne: Personne,
    #[serde(default)]
    pub specialite: Option<Specialite>,
    #[serde(default)]
    pub numero_licence: Option<String>,
    #[serde(default)]
    pub annees_experience: Option<u32>,
    #[serde(default)]
    pub tarif_consultation: Option<f64>,
    #[serde(default)]
    pub note_moyenne: Option<f64>,
    #[serde(default)]
    pub nombre_avis: Option<u32>,
    #[serde(default)]
    pub langue: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl Docteur {
    /// Correspondance insensible à la casse sur nom, prénom ou spécialité
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.personne.nom.to_lowercase().contains(&term)
            || self.personne.prenom.to_lowercase().contains(&term)
            || self
                .specialite
                .as_ref()
                .map(|s| s.titre.to_lowercase().contains(&term))
                .unwrap_or(false)
    }
}

/// Données pour la connexion d'un utilisateur
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Format d'email invalide"))]
    pub email: String,

    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères"))]
    pub mot_de_passe: String,
}

/// Réponse de `/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, deserialize_with = "deserialize_role_lenient")]
    pub role: Option<Role>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Formulaire d'inscription (avec confirmation du mot de passe)
#[derive(Debug, Clone, Validate)]
pub struct SignupForm {
    #[validate(length(min = 2, message = "Le nom doit contenir au moins 2 caractères"))]
    pub nom: String,

    #[validate(length(min = 2, message = "Le prénom doit contenir au moins 2 caractères"))]
    pub prenom: String,

    #[validate(email(message = "Format d'email invalide"))]
    pub email: String,

    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères"))]
    pub mot_de_passe: String,

    pub confirm_password: String,

    pub role: Role,
}

impl SignupForm {
    /// Corps envoyé à l'API (sans la confirmation)
    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            nom: self.nom.trim().to_string(),
            prenom: self.prenom.trim().to_string(),
            email: self.email.trim().to_string(),
            mot_de_passe: self.mot_de_passe.clone(),
            role: self.role,
        }
    }
}

/// Corps de `/auth/signup`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub mot_de_passe: String,
    pub role: Role,
}

/// Corps de `/auth/signup/docteur`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DocteurSignupRequest {
    #[validate(length(min = 2, message = "Le nom doit contenir au moins 2 caractères"))]
    pub nom: String,

    #[validate(length(min = 2, message = "Le prénom doit contenir au moins 2 caractères"))]
    pub prenom: String,

    #[validate(email(message = "Format d'email invalide"))]
    pub email: String,

    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères"))]
    pub mot_de_passe: String,

    #[validate(range(min = 1, message = "Spécialité requise"))]
    pub specialite_id: i64,

    #[validate(length(min = 1, message = "Numéro de licence requis"))]
    pub numero_licence: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annees_experience: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tarif_consultation: Option<f64>,
}

/// Mise à jour du profil patient (`PUT /patients/{id}/profil`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_naissance: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groupe_sanguin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antecedents_medicaux: Option<String>,
}

/// Mise à jour du profil docteur (`PUT /docteurs/{id}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocteurProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adresse_cabinet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annees_experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tarif_consultation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub langue: Option<String>,
}

/// Création d'un compte par un administrateur
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUtilisateur {
    #[validate(length(min = 2, message = "Le nom doit contenir au moins 2 caractères"))]
    pub nom: String,

    #[validate(length(min = 2, message = "Le prénom doit contenir au moins 2 caractères"))]
    pub prenom: String,

    #[validate(email(message = "Format d'email invalide"))]
    pub email: String,

    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères"))]
    pub mot_de_passe: String,

    pub role: Role,
}

/// Modification d'un compte par un administrateur
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilisateurUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prenom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
}
