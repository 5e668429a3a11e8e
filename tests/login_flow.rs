// tests/login_flow.rs
use doctime_client::{
    can_activate, redirect_after_login, Clients, Config, GuardDecision, LoginRequest,
    PatientDashboard, Role, Route, SessionContext,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token(role: &str, user_id: i64) -> String {
    let claims = json!({
        "sub": "alice@doctime.fr",
        "role": role,
        "userId": user_id,
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"integration"))
        .expect("jeton de test")
}

async fn mock_patient_backend(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token("PATIENT", 4),
            "role": "PATIENT",
            "userId": 4,
            "message": "Connexion réussie"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rendezvous/patient/4"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "dateHeure": "2099-03-01T09:30:00", "statut": "CONFIRME", "motif": "Suivi tension"},
            {"id": 2, "dateHeure": "2020-03-01T09:30:00", "statut": "ANNULE", "motif": "Vaccin grippe"}
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docteurs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "nom": "Martin", "prenom": "Paul", "specialite": {"id": 1, "titre": "Cardiologie"}}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn patient_login_guard_and_dashboard() {
    let server = MockServer::start().await;
    mock_patient_backend(&server).await;

    let dir = tempdir().unwrap();
    let config = Config {
        session_file: Some(dir.path().join("session.json")),
        ..Config::with_api_url(&server.uri())
    };
    let clients = Clients::from_config(&config).unwrap();

    let response = clients
        .auth
        .login(&LoginRequest {
            email: "alice@doctime.fr".to_string(),
            mot_de_passe: "secret1".to_string(),
        })
        .await
        .unwrap();

    let route = redirect_after_login(response.role);
    assert_eq!(route, Route::PatientDashboard);
    assert_eq!(can_activate(&clients.session, route), GuardDecision::Allow);
    assert_eq!(
        can_activate(&clients.session, Route::DoctorDashboard),
        GuardDecision::Redirect(Route::PatientDashboard)
    );

    let dashboard = PatientDashboard::mount(clients.patient.clone()).await.unwrap();
    assert_eq!(dashboard.appointments().len(), 2);
    assert_eq!(dashboard.doctors().len(), 1);
    let stats = dashboard.statistics();
    assert_eq!(stats.a_venir, 1);
    assert_eq!(stats.annules, 1);

    // La session survit à un redémarrage via le fichier
    let reopened = SessionContext::from_config(&config).unwrap();
    assert_eq!(reopened.role(), Some(Role::Patient));
    assert_eq!(reopened.user_id(), Some(4));

    assert_eq!(clients.auth.logout(), Route::Login);
    assert!(!clients.session.is_logged_in());
    assert_eq!(
        can_activate(&clients.session, Route::PatientDashboard),
        GuardDecision::Redirect(Route::Login)
    );
}

#[tokio::test]
async fn revoked_session_is_logged_out_by_server_refusal() {
    let server = MockServer::start().await;
    mock_patient_backend(&server).await;
    Mock::given(method("GET"))
        .and(path("/admin/statistiques"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let clients = Clients::new(&Config::with_api_url(&server.uri()), SessionContext::in_memory()).unwrap();
    clients
        .auth
        .login(&LoginRequest {
            email: "alice@doctime.fr".to_string(),
            mot_de_passe: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert!(clients.session.is_logged_in());

    let err = clients.admin.global_statistics().await.unwrap_err();
    assert!(err.is_auth_failure());
    assert!(!clients.session.is_logged_in());
}
