use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::{Context, anyhow};
use dotenvy::dotenv;

use leave_ledger::api;
use leave_ledger::auth::auth::AdminCredentials;
use leave_ledger::config::Config;
use leave_ledger::db::init_db;
use leave_ledger::docs;
use leave_ledger::ledger::LeaveLedger;
use leave_ledger::{notify, routes, seed};

use tracing::info;
use tracing_appender::rolling;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "leave-ledger.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    let ledger = LeaveLedger::new(pool, notify::from_config(&config.email));

    if let Some(path) = &config.seed_file {
        seed::seed_employees(&ledger, path).await?;
    }

    let credentials = AdminCredentials::from_config(&config)
        .map_err(|e| anyhow!("Failed to hash ADMIN_PASSWORD: {e}"))?;
    if !credentials.is_configured() {
        tracing::warn!("No ADMIN_PASSWORD or ADMIN_PASSWORD_HASH set; admin login is disabled");
    }

    let limiter = routes::login_limiter(config.rate_login_per_min)
        .ok_or_else(|| anyhow!("Invalid RATE_LOGIN_PER_MIN: {}", config.rate_login_per_min))?;

    // Clone values for the closure (avoid move issues)
    let server_addr = config.server_addr.clone();
    let api_prefix = config.api_prefix.clone();
    let openapi = docs::api_doc(&api_prefix);

    info!(addr = %server_addr, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", openapi.clone()),
            )
            .app_data(Data::new(ledger.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(credentials.clone()))
            .service(api::index)
            .configure(|cfg| routes::configure(cfg, &api_prefix, &limiter))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
