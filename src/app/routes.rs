// app/routes.rs
use crate::app::session::SessionContext;
use crate::models::Role;
use std::fmt;

/// Pages de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Signup,
    PatientDashboard,
    DoctorDashboard,
    AdminDashboard,
    NewAppointment,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Login,
        Route::Signup,
        Route::PatientDashboard,
        Route::DoctorDashboard,
        Route::AdminDashboard,
        Route::NewAppointment,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::PatientDashboard => "/patient/dashboard",
            Route::DoctorDashboard => "/doctor/dashboard",
            Route::AdminDashboard => "/admin/dashboard",
            Route::NewAppointment => "/patient/nouveau-rendezvous",
        }
    }

    /// Chemin -> page (la query string est ignorée)
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split('?').next().unwrap_or(path);
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Rôle exigé pour accéder à la page
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::PatientDashboard | Route::NewAppointment => Some(Role::Patient),
            Route::DoctorDashboard => Some(Role::Docteur),
            Route::AdminDashboard => Some(Role::Admin),
            Route::Home | Route::Login | Route::Signup => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Role {
    /// Tableau de bord propre au rôle
    pub fn dashboard(&self) -> Route {
        match self {
            Role::Patient => Route::PatientDashboard,
            Role::Docteur => Route::DoctorDashboard,
            Role::Admin => Route::AdminDashboard,
        }
    }
}

/// Page affichée après une connexion réussie
pub fn redirect_after_login(role: Option<Role>) -> Route {
    role.map(|r| r.dashboard()).unwrap_or(Route::Home)
}

/// Cible du bouton "Commencer" de la page d'accueil
pub fn landing_route(session: &SessionContext) -> Route {
    match session.role() {
        Some(role) => role.dashboard(),
        None => Route::Signup,
    }
}
