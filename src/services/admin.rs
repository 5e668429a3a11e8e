// services/admin.rs
use crate::models::{
    LogActivite, NewUtilisateur, RapportMensuel, RendezVous, Role, StatistiquesGlobales, User,
    UtilisateurUpdate,
};
use crate::app::session::SessionContext;
use crate::services::api::ApiClient;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_object;

/// Services d'administration de la plateforme
#[derive(Debug, Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn session(&self) -> &SessionContext {
        self.api.session()
    }

    pub async fn global_statistics(&self) -> Result<StatistiquesGlobales> {
        self.api.get("/admin/statistiques").await
    }

    // Utilisateurs

    pub async fn all_users(&self) -> Result<Vec<User>> {
        self.api.get("/admin/utilisateurs").await
    }

    pub async fn users_by_role(&self, role: Role) -> Result<Vec<User>> {
        self.api
            .get(&format!("/admin/utilisateurs/role/{}", role.as_str()))
            .await
    }

    pub async fn create_user(&self, utilisateur: &NewUtilisateur) -> Result<User> {
        validate_object(utilisateur)?;
        self.api.post("/admin/utilisateurs", utilisateur).await
    }

    pub async fn update_user(&self, user_id: i64, update: &UtilisateurUpdate) -> Result<User> {
        self.api
            .put(&format!("/admin/utilisateurs/{}", user_id), update)
            .await
    }

    pub async fn toggle_user_active(&self, user_id: i64) -> Result<()> {
        self.api
            .patch(&format!("/admin/utilisateurs/{}/toggle-actif", user_id))
            .await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        self.api
            .delete(&format!("/admin/utilisateurs/{}", user_id))
            .await
    }

    // Rendez-vous

    pub async fn all_appointments(&self) -> Result<Vec<RendezVous>> {
        self.api.get("/admin/rendezvous").await
    }

    pub async fn recent_appointments(&self) -> Result<Vec<RendezVous>> {
        self.api.get("/admin/rendezvous/recent").await
    }

    // Rapports

    pub async fn monthly_report(&self, mois: u32, annee: i32) -> Result<RapportMensuel> {
        if !(1..=12).contains(&mois) {
            return Err(AppError::Validation(format!("Mois invalide: {}", mois)));
        }
        self.api
            .get(&format!("/admin/rapports/mensuel/{}/{}", annee, mois))
            .await
    }

    pub async fn activity_logs(&self) -> Result<Vec<LogActivite>> {
        self.api.get("/admin/logs").await
    }
}
