// services/auth.rs
use crate::app::routes::Route;
use crate::models::{DocteurSignupRequest, LoginRequest, LoginResponse, SignupForm};
use crate::services::api::ApiClient;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_object, validate_password_match};
use tracing::info;

#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Connexion email/mot de passe ; ouvre la session en cas de succès
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        validate_object(request)?;

        let response: LoginResponse = match self.api.post("/auth/login", request).await {
            Ok(response) => response,
            // Identifiants refusés : pas de session à invalider
            Err(AppError::Auth(_)) => {
                return Err(AppError::Validation(
                    "Email ou mot de passe incorrect".to_string(),
                ))
            }
            Err(e) => return Err(e),
        };

        self.api.session().open(&response)?;
        info!("✅ Connexion réussie pour {}", request.email);

        Ok(response)
    }

    /// Inscription publique (patient ou docteur) ; renvoie le message du serveur
    pub async fn signup(&self, form: &SignupForm) -> Result<String> {
        validate_object(form)?;
        validate_password_match(&form.mot_de_passe, &form.confirm_password)?;

        if !form.role.can_self_register() {
            return Err(AppError::Validation(
                "Rôle non autorisé à l'inscription".to_string(),
            ));
        }

        let message = self.api.post_text("/auth/signup", &form.to_request()).await?;
        info!("📝 Inscription envoyée pour {} ({})", form.email.trim(), form.role);

        Ok(message)
    }

    /// Inscription d'un docteur avec ses informations professionnelles
    pub async fn signup_docteur(&self, request: &DocteurSignupRequest) -> Result<String> {
        validate_object(request)?;
        self.api.post_text("/auth/signup/docteur", request).await
    }

    pub fn logout(&self) -> Route {
        self.api.session().logout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::test_utils::{make_token, test_client};
    use crate::app::session::SessionContext;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn signup_form() -> SignupForm {
        SignupForm {
            nom: "Durand".to_string(),
            prenom: "Alice".to_string(),
            email: "alice@doctime.fr".to_string(),
            mot_de_passe: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            role: Role::Patient,
        }
    }

    #[tokio::test]
    async fn test_login_opens_session() {
        let server = MockServer::start().await;
        let token = make_token(Some("PATIENT"), Some(4), 3600);

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"email": "alice@doctime.fr", "motDePasse": "secret1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": token,
                "role": "PATIENT",
                "userId": 4,
                "message": "Connexion réussie"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = SessionContext::in_memory();
        let auth = AuthService::new(test_client(&server.uri(), ctx.clone()));

        let response = auth
            .login(&LoginRequest {
                email: "alice@doctime.fr".to_string(),
                mot_de_passe: "secret1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.role, Some(Role::Patient));
        assert!(ctx.is_logged_in());
        assert_eq!(ctx.user_id(), Some(4));

        assert_eq!(auth.logout(), Route::Login);
        assert!(!ctx.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_rejected_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let ctx = SessionContext::in_memory();
        let auth = AuthService::new(test_client(&server.uri(), ctx.clone()));

        let err = auth
            .login(&LoginRequest {
                email: "alice@doctime.fr".to_string(),
                mot_de_passe: "mauvais".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Email ou mot de passe incorrect");
        assert!(!ctx.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_invalid_form_never_hits_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let auth = AuthService::new(test_client(&server.uri(), SessionContext::in_memory()));
        let err = auth
            .login(&LoginRequest {
                email: "pas-un-email".to_string(),
                mot_de_passe: "123".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_signup_returns_server_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .and(body_json(json!({
                "nom": "Durand",
                "prenom": "Alice",
                "email": "alice@doctime.fr",
                "motDePasse": "secret1",
                "role": "PATIENT"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("Utilisateur enregistré"))
            .expect(1)
            .mount(&server)
            .await;

        let auth = AuthService::new(test_client(&server.uri(), SessionContext::in_memory()));
        let message = auth.signup(&signup_form()).await.unwrap();
        assert_eq!(message, "Utilisateur enregistré");
    }

    #[tokio::test]
    async fn test_signup_local_rules() {
        let auth = AuthService::new(test_client("http://127.0.0.1:1", SessionContext::in_memory()));

        let mut form = signup_form();
        form.confirm_password = "autre123".to_string();
        let err = auth.signup(&form).await.unwrap_err();
        assert_eq!(err.user_message(), "Les mots de passe ne correspondent pas");

        let mut form = signup_form();
        form.role = Role::Admin;
        assert!(matches!(auth.signup(&form).await, Err(AppError::Validation(_))));

        let mut form = signup_form();
        form.nom = "D".to_string();
        assert!(matches!(auth.signup(&form).await, Err(AppError::Validation(_))));
    }
}
