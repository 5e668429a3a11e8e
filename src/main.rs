use anyhow::Context;
use doctime_client::{
    calculate_age, can_activate, format_date, format_heure, format_relative_date,
    redirect_after_login, truncate_string, AdminDashboard, Clients, Config, DoctorDashboard,
    GuardDecision, LoginRequest, PatientDashboard, Role, NAME, VERSION,
};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Chargement de la configuration
    let config = Config::from_env().context("❌ Impossible de charger la configuration")?;

    // Initialisation du logging
    setup_tracing(&config);
    info!("🚀 Démarrage de {} v{}", NAME, VERSION);
    info!("🔧 Mode: {} - API: {}", config.run_mode, config.api_url);
    if config.is_production() && !config.api_url.starts_with("https://") {
        warn!("⚠️  API non chiffrée en production: {}", config.api_url);
    }

    let mut args = env::args().skip(1);
    let (email, mot_de_passe) = match (args.next(), args.next()) {
        (Some(email), Some(mot_de_passe)) => (email, mot_de_passe),
        _ => {
            eprintln!("Usage: doctime <email> <mot-de-passe>");
            std::process::exit(2);
        }
    };

    let clients = Clients::from_config(&config)?;

    let response = match clients
        .auth
        .login(&LoginRequest {
            email,
            mot_de_passe,
        })
        .await
    {
        Ok(response) => response,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    let route = redirect_after_login(response.role);
    println!("Connecté. Redirection vers {}", route);

    if let GuardDecision::Redirect(target) = can_activate(&clients.session, route) {
        warn!("Accès refusé à {}, redirection vers {}", route, target);
        println!("Accès refusé, redirection vers {}", target);
        return Ok(());
    }

    match response.role {
        Some(Role::Patient) => {
            let dashboard = PatientDashboard::mount(clients.patient.clone()).await?;
            let stats = dashboard.statistics();
            println!(
                "{} rendez-vous ({} à venir, {} passés, {} annulés)",
                stats.total, stats.a_venir, stats.passes, stats.annules
            );
            let now = chrono::Local::now().naive_local();
            if let Some(prochain) = dashboard.upcoming(now).first() {
                println!(
                    "Prochain rendez-vous: {} à {} ({}) - {}",
                    format_date(prochain.date_heure.date()),
                    format_heure(&prochain.date_heure),
                    format_relative_date(&prochain.date_heure, &now),
                    truncate_string(&prochain.motif, 40)
                );
            }
        }
        Some(Role::Docteur) => {
            let dashboard = DoctorDashboard::mount(clients.doctor.clone()).await?;
            let stats = dashboard.statistics();
            println!(
                "{} rendez-vous aujourd'hui, {} au total, {} patients",
                dashboard.todays_appointments().len(),
                stats.total_rendez_vous,
                dashboard.unique_patients().len()
            );

            let now = chrono::Local::now().naive_local();
            for patient in dashboard.unique_patients() {
                let age = patient
                    .date_naissance
                    .map(|naissance| format!(" ({} ans)", calculate_age(naissance, now.date())))
                    .unwrap_or_default();
                let visite = dashboard
                    .last_visit(patient.personne.id)
                    .map(|rdv| format_relative_date(&rdv.date_heure, &now))
                    .unwrap_or_else(|| "jamais".to_string());
                println!(
                    "- {}{}, dernière visite: {}",
                    patient.personne.nom_complet(),
                    age,
                    visite
                );
            }
        }
        Some(Role::Admin) => {
            let dashboard = AdminDashboard::mount(clients.admin.clone()).await?;
            let stats = dashboard.statistics();
            println!(
                "{} utilisateurs, {} rendez-vous, {} aujourd'hui",
                stats.total_utilisateurs, stats.total_rendez_vous, stats.rendez_vous_aujourdhui
            );
        }
        None => println!("Rôle inconnu"),
    }

    Ok(())
}

/// Configure le tracing pour le logging structuré
fn setup_tracing(config: &Config) {
    let log_level = config
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);

    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level.into()),
        )
        .with(if config.logging_format == "json" {
            Box::new(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(true),
            ) as Box<dyn tracing_subscriber::Layer<_> + Send + Sync>
        } else {
            Box::new(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_line_number(true)
                    .with_file(true),
            ) as Box<dyn tracing_subscriber::Layer<_> + Send + Sync>
        });

    subscriber.init();
}
