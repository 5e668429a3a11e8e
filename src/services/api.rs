// services/api.rs
use crate::app::session::SessionContext;
use crate::utils::config::Config;
use crate::utils::error::{AppError, Result};
use crate::utils::helpers::generate_request_id;
use reqwest::multipart::Form;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Client HTTP partagé par tous les services REST
///
/// Ajoute l'en-tête `Authorization: Bearer` tant que la session est valide,
/// et force la déconnexion dès que le serveur répond 401 ou 403.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: HttpClient,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionContext) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = generate_request_id();
        debug!(request_id = %request_id, "➡️  {} {}", method, path);

        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header("X-Request-Id", request_id);

        // Jeton expiré ou absent : requête anonyme
        match self.session.current() {
            Ok(session) => builder.bearer_auth(session.token),
            Err(_) => builder,
        }
    }

    /// Envoyer la requête et convertir les statuts d'échec en erreurs
    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            warn!("🌐 Serveur injoignable pour {}: {}", path, e);
            AppError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = AppError::from_response(status, &body);

        if let AppError::Auth(failure) = &error {
            self.session
                .force_logout(&format!("{:?} ({}) sur {}", failure, status.as_u16(), path));
        } else {
            warn!("❌ {} sur {}: {}", status.as_u16(), path, error);
        }

        Err(error)
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Parse(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path), path).await?;
        Self::json(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body), path)
            .await?;
        Self::json(response).await
    }

    /// POST dont la réponse est un simple texte (inscription)
    pub async fn post_text<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String> {
        let response = self
            .send(self.request(Method::POST, path).json(body), path)
            .await?;
        response
            .text()
            .await
            .map_err(|e| AppError::Parse(e.to_string()))
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let response = self
            .send(self.request(Method::POST, path).multipart(form), path)
            .await?;
        Self::json(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PUT, path).json(body), path)
            .await?;
        Self::json(response).await
    }

    /// PUT dont le corps de réponse est ignoré
    pub async fn put_no_content<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(self.request(Method::PUT, path).json(body), path)
            .await?;
        Ok(())
    }

    pub async fn patch(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::PATCH, path), path).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path), path).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
