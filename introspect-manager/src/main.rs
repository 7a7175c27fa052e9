use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::{Arg, Command};
use introspect_manager::autosave::AutosaveScheduler;
use introspect_manager::config::AppConfig;
use introspect_manager::database::Database;
use introspect_manager::error::AppResult;
use introspect_manager::handlers::AppState;
use introspect_manager::routes;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[actix_web::main]
async fn main() -> AppResult<()> {
    // Parse command line arguments
    let matches = Command::new("introspect-manager")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Introspect Manager - intake questionnaire and estimate daemon")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file")
                .value_name("FILE"),
        )
        .get_matches();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("introspect_manager=info".parse().expect("valid directive")),
        )
        .init();

    tracing::info!("Starting Introspect Manager daemon");

    // Load configuration
    let config = match matches.get_one::<String>("config") {
        Some(path) => AppConfig::load_from_file(Path::new(path))?,
        None => AppConfig::load()?,
    };

    // Initialize the session store
    let database = Arc::new(Database::new(&config.database.path)?);
    tracing::info!("Session store initialized at {:?}", config.database.path);

    match database.sweep_expired(config.sessions.retention_days) {
        Ok(0) => {}
        Ok(removed) => tracing::info!("Swept {removed} expired session snapshots"),
        Err(e) => tracing::warn!("Retention sweep failed: {e}"),
    }

    let autosave = Arc::new(AutosaveScheduler::new(
        Arc::clone(&database),
        config.sessions.autosave_debounce_ms,
    ));

    let app_state = web::Data::new(AppState {
        database,
        sessions: Arc::new(Mutex::new(HashMap::new())),
        autosave,
        config: Arc::new(config.clone()),
        start_time: SystemTime::now(),
    });

    let server_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting HTTP server on {}", server_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .configure(routes::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}
