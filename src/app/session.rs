// app/session.rs
//! # Session
//!
//! Contexte de session explicite, injecté dans les services HTTP, les gardes
//! et les tableaux de bord. Seuls trois éléments sont persistés : le jeton,
//! le rôle et l'identifiant utilisateur.
//!
//! Le jeton est décodé sans vérification de signature (le client ne connaît
//! pas le secret) ; l'expiration est contrôlée localement. Tout échec de
//! décodage est traité comme une absence de session.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::routes::Route;
use crate::models::user::{deserialize_role_lenient, LoginResponse, Role};
use crate::services::storage::{FileStorage, MemoryStorage, SessionStorage};
use crate::utils::config::Config;
use crate::utils::error::{InvalidTokenError, Result};

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const USER_ID_KEY: &str = "userId";

/// Claims lus dans le jeton
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default, deserialize_with = "deserialize_role_lenient")]
    pub role: Option<Role>,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub exp: i64,
}

/// Session valide
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

/// Décoder un jeton sans vérifier sa signature
pub fn decode_token(token: &str) -> std::result::Result<TokenClaims, InvalidTokenError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| InvalidTokenError::Malformed(e.to_string()))
}

/// Contexte de session partagé
#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Session non persistée
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Fichier de session si configuré, sinon mémoire
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.session_file {
            Some(path) => Ok(Self::new(Arc::new(FileStorage::open(path)?))),
            None => Ok(Self::in_memory()),
        }
    }

    /// Enregistrer la session ouverte par `/auth/login`
    pub fn open(&self, response: &LoginResponse) -> Result<()> {
        self.storage.set(TOKEN_KEY, &response.token)?;

        match response.role {
            Some(role) => self.storage.set(ROLE_KEY, role.as_str())?,
            None => self.storage.remove(ROLE_KEY)?,
        }

        match response.user_id {
            Some(user_id) => self.storage.set(USER_ID_KEY, &user_id.to_string())?,
            None => self.storage.remove(USER_ID_KEY)?,
        }

        info!("🔐 Session ouverte (rôle: {:?})", response.role);
        Ok(())
    }

    /// Jeton brut stocké, valide ou non
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    pub fn current(&self) -> std::result::Result<Session, InvalidTokenError> {
        self.current_at(Utc::now())
    }

    /// Session valide à l'instant `now`. Un jeton expiré ou illisible efface
    /// les informations stockées.
    pub fn current_at(&self, now: DateTime<Utc>) -> std::result::Result<Session, InvalidTokenError> {
        let token = self.token().ok_or(InvalidTokenError::Missing)?;

        let claims = match decode_token(&token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!("⚠️  Jeton illisible, session ignorée: {}", e);
                self.clear();
                return Err(e);
            }
        };

        let Some(expires_at) = Utc.timestamp_opt(claims.exp, 0).single() else {
            warn!("⚠️  Expiration hors limites ({}), session ignorée", claims.exp);
            self.clear();
            return Err(InvalidTokenError::Malformed(format!("exp hors limites: {}", claims.exp)));
        };

        if expires_at < now {
            info!("⏰ Jeton expiré le {}, nettoyage de la session", expires_at);
            self.clear();
            return Err(InvalidTokenError::Expired(expires_at));
        }

        let role = claims
            .role
            .or_else(|| self.storage.get(ROLE_KEY).and_then(|r| r.parse().ok()))
            .ok_or(InvalidTokenError::MissingRole)?;

        let user_id = claims
            .user_id
            .or_else(|| self.storage.get(USER_ID_KEY).and_then(|id| id.parse().ok()))
            .or_else(|| claims.sub.as_deref().and_then(|sub| sub.parse().ok()))
            .ok_or(InvalidTokenError::MissingUserId)?;

        Ok(Session {
            token,
            user_id,
            role,
            expires_at,
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.current().is_ok()
    }

    pub fn role(&self) -> Option<Role> {
        self.current().ok().map(|s| s.role)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.current().ok().map(|s| s.user_id)
    }

    /// Date d'expiration du jeton stocké, sans effacer la session
    pub fn token_expiration(&self) -> Option<DateTime<Utc>> {
        let claims = decode_token(&self.token()?).ok()?;
        Utc.timestamp_opt(claims.exp, 0).single()
    }

    /// Déconnexion volontaire ; renvoie la page de redirection
    pub fn logout(&self) -> Route {
        self.clear();
        info!("👋 Déconnexion");
        Route::Login
    }

    /// Déconnexion imposée par un refus du serveur (401/403)
    pub fn force_logout(&self, reason: &str) -> Route {
        warn!("🚪 Déconnexion forcée: {}", reason);
        self.clear();
        Route::Login
    }

    fn clear(&self) {
        for key in [TOKEN_KEY, ROLE_KEY, USER_ID_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("⚠️  Impossible d'effacer '{}' du stockage: {}", key, e);
            }
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}
