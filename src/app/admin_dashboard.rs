// app/admin_dashboard.rs
use tracing::{info, warn};

use crate::models::{LogActivite, RapportMensuel, RendezVous, Role, StatistiquesGlobales, User};
use crate::services::admin::AdminService;
use crate::utils::error::{AppError, Result};

/// Filtre sur l'état des comptes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    Tous,
    Actif,
    Inactif,
}

impl StatusFilter {
    fn accepts(&self, user: &User) -> bool {
        match self {
            StatusFilter::Tous => true,
            StatusFilter::Actif => user.actif,
            StatusFilter::Inactif => !user.actif,
        }
    }
}

/// Tableau de bord administrateur
pub struct AdminDashboard {
    service: AdminService,
    statistiques: StatistiquesGlobales,
    utilisateurs: Vec<User>,
    recents: Vec<RendezVous>,
    role_filter: Option<Role>,
    search: String,
    status_filter: StatusFilter,
}

impl AdminDashboard {
    pub async fn mount(service: AdminService) -> Result<Self> {
        service.session().user_id().ok_or(AppError::NotLoggedIn)?;

        let mut dashboard = Self {
            service,
            statistiques: StatistiquesGlobales::default(),
            utilisateurs: Vec::new(),
            recents: Vec::new(),
            role_filter: None,
            search: String::new(),
            status_filter: StatusFilter::Tous,
        };
        dashboard.reload().await;

        Ok(dashboard)
    }

    pub async fn reload(&mut self) {
        let (statistiques, utilisateurs, recents) = tokio::join!(
            self.service.global_statistics(),
            self.fetch_users(),
            self.service.recent_appointments()
        );

        match statistiques {
            Ok(stats) => self.statistiques = stats,
            Err(e) => warn!("Erreur chargement statistiques: {}", e),
        }
        match utilisateurs {
            Ok(users) => self.utilisateurs = users,
            Err(e) => warn!("Erreur chargement utilisateurs: {}", e),
        }
        match recents {
            Ok(list) => self.recents = list,
            Err(e) => warn!("Erreur chargement rendez-vous récents: {}", e),
        }
    }

    async fn fetch_users(&self) -> Result<Vec<User>> {
        match self.role_filter {
            Some(role) => self.service.users_by_role(role).await,
            None => self.service.all_users().await,
        }
    }

    pub fn statistics(&self) -> &StatistiquesGlobales {
        &self.statistiques
    }

    pub fn users(&self) -> &[User] {
        &self.utilisateurs
    }

    pub fn recent_appointments(&self) -> &[RendezVous] {
        &self.recents
    }

    pub fn role_filter(&self) -> Option<Role> {
        self.role_filter
    }

    /// Change le filtre de rôle et recharge la liste depuis le serveur
    pub async fn set_role_filter(&mut self, role: Option<Role>) {
        self.role_filter = role;
        match self.fetch_users().await {
            Ok(users) => self.utilisateurs = users,
            Err(e) => warn!("Erreur chargement utilisateurs: {}", e),
        }
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_lowercase();
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    /// Utilisateurs correspondant à la recherche (nom, prénom, email) et à l'état
    pub fn filtered_users(&self) -> Vec<&User> {
        self.utilisateurs
            .iter()
            .filter(|u| {
                self.search.is_empty()
                    || u.personne.nom.to_lowercase().contains(&self.search)
                    || u.personne.prenom.to_lowercase().contains(&self.search)
                    || u.personne.email.to_lowercase().contains(&self.search)
            })
            .filter(|u| self.status_filter.accepts(u))
            .collect()
    }

    pub async fn toggle_active(&mut self, user_id: i64) -> Result<()> {
        self.service.toggle_user_active(user_id).await?;
        info!("Statut du compte {} inversé", user_id);
        self.reload().await;
        Ok(())
    }

    pub async fn delete_user(&mut self, user_id: i64) -> Result<()> {
        self.service.delete_user(user_id).await?;
        info!("🗑️  Compte {} supprimé", user_id);
        self.reload().await;
        Ok(())
    }

    pub async fn monthly_report(&self, mois: u32, annee: i32) -> Result<RapportMensuel> {
        self.service.monthly_report(mois, annee).await
    }

    pub async fn activity_logs(&self) -> Result<Vec<LogActivite>> {
        self.service.activity_logs().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{logged_in_context, test_client};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn users() -> serde_json::Value {
        json!([
            {"id": 1, "nom": "Admin", "prenom": "Root", "email": "root@doctime.fr", "role": "ADMIN"},
            {"id": 4, "nom": "Durand", "prenom": "Alice", "email": "alice@doctime.fr", "role": "PATIENT"},
            {"id": 7, "nom": "Martin", "prenom": "Paul", "email": "paul.martin@doctime.fr", "role": "DOCTEUR", "actif": false}
        ])
    }

    async fn mount_common(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/admin/statistiques"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalUtilisateurs": 3})))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/utilisateurs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/rendezvous/recent"))
            .respond_with(ResponseTemplate::new(500))
            .mount(server)
            .await;
    }

    fn service(uri: &str) -> AdminService {
        AdminService::new(test_client(uri, logged_in_context(Role::Admin, 1)))
    }

    #[tokio::test]
    async fn test_search_and_status_filters() {
        let server = MockServer::start().await;
        mount_common(&server).await;

        let mut dashboard = AdminDashboard::mount(service(&server.uri())).await.unwrap();
        assert_eq!(dashboard.statistics().total_utilisateurs, 3);
        assert!(dashboard.recent_appointments().is_empty());
        assert_eq!(dashboard.filtered_users().len(), 3);

        dashboard.set_search("MARTIN");
        let ids: Vec<i64> = dashboard.filtered_users().iter().map(|u| u.personne.id).collect();
        assert_eq!(ids, vec![7]);

        dashboard.set_search("doctime.fr");
        dashboard.set_status_filter(StatusFilter::Actif);
        assert_eq!(dashboard.filtered_users().len(), 2);

        dashboard.set_status_filter(StatusFilter::Inactif);
        assert_eq!(dashboard.filtered_users().len(), 1);
    }

    #[tokio::test]
    async fn test_role_filter_uses_role_endpoint() {
        let server = MockServer::start().await;
        mount_common(&server).await;
        Mock::given(method("GET"))
            .and(path("/admin/utilisateurs/role/PATIENT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 4, "nom": "Durand", "prenom": "Alice", "email": "alice@doctime.fr", "role": "PATIENT"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut dashboard = AdminDashboard::mount(service(&server.uri())).await.unwrap();
        dashboard.set_role_filter(Some(Role::Patient)).await;
        assert_eq!(dashboard.users().len(), 1);
        assert_eq!(dashboard.role_filter(), Some(Role::Patient));
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let server = MockServer::start().await;
        mount_common(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/admin/utilisateurs/4"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "Utilisateur avec rendez-vous"})),
            )
            .mount(&server)
            .await;

        let mut dashboard = AdminDashboard::mount(service(&server.uri())).await.unwrap();
        let err = dashboard.delete_user(4).await.unwrap_err();
        assert_eq!(err.user_message(), "Utilisateur avec rendez-vous");
        assert_eq!(dashboard.users().len(), 3);
    }
}
