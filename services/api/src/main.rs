use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use whose_turn_api::config::Config;
use whose_turn_api::routes::router;
use whose_turn_core::{InMemoryTurnStore, Roster, StateScope, TurnSkill};

/// Serves the whose-turn voice skill over HTTP.
#[derive(Parser)]
struct Cli {
    /// Address to listen on. Overrides BIND_ADDRESS.
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Comma separated names taking turns. Overrides ROSTER.
    #[arg(long)]
    roster: Option<Roster>,

    /// "session" or "user". Overrides TURN_STATE_SCOPE.
    #[arg(long)]
    scope: Option<StateScope>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Load Configuration ---
    let mut config = Config::from_env().context("Failed to load application configuration")?;

    let args = Cli::parse();
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    if let Some(roster) = args.roster {
        config.roster = roster;
    }
    if let Some(scope) = args.scope {
        config.scope = scope;
    }

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    info!(
        "Configuration loaded. Roster: {}; state scope: {}",
        config.roster.names().join(", "),
        config.scope
    );

    // --- 3. Build the skill ---
    let mut skill = TurnSkill::new(config.roster.clone(), InMemoryTurnStore::new())
        .with_scope(config.scope);
    if let Some(application_id) = &config.application_id {
        skill = skill.with_application_id(application_id);
    }
    let app = router(Arc::new(skill));

    // --- 4. Serve ---
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Skill endpoint listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
