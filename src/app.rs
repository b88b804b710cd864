/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (DB pool, identity resolver, access gate) → Router 組み立て
 * - Middleware の適用 (gate / security headers / http)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api::{self, handlers::health::health},
    config::Config,
    middleware,
    pages::{self, PageSettings},
    repos::{branch_repo::PgBranchDirectory, payroll_entry_repo::PgPayrollEntryRepo},
    services::{
        gate::{AccessGate, BranchAssociationStage},
        identity::build_identity_resolver,
    },
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,payroll_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched.
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting payroll-api in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    // Process-level clients are built once here and shared through AppState.
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .context("failed to connect to the database")?;

    let identity = build_identity_resolver(config).context("failed to build identity resolver")?;

    let mut gate = AccessGate::new(config.sign_in_path.clone());
    if config.branch_gate_enabled {
        tracing::info!("branch association stage enabled");
        gate = gate.with_stage(Arc::new(BranchAssociationStage::new(
            Arc::new(PgBranchDirectory::new(db.clone())),
            config.no_access_path.clone(),
        )));
    }

    Ok(AppState::new(
        Arc::new(PgPayrollEntryRepo::new(db)),
        identity,
        Arc::new(gate),
        Arc::new(page_settings(config)),
    ))
}

pub fn page_settings(config: &Config) -> PageSettings {
    PageSettings {
        sign_in_path: config.sign_in_path.clone(),
        no_access_path: config.no_access_path.clone(),
        auth_widget_script_url: config.auth_widget_script_url.clone(),
    }
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .merge(pages::dashboard_routes(state.clone()))
        .merge(pages::routes(&state.pages))
        .nest("/api", api::routes())
        .fallback(pages::not_found)
        .with_state(state);

    let router = middleware::security_headers::apply(router, config);
    middleware::http::apply(router, config)
}
