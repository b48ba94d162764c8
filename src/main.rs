// Main entry point - Wiring and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::application::event_loop::{run_event_loop, CLOCK_PERIOD};
use crate::application::presenter::DashboardPresenter;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::push_channel::{subscribe, SseChannel};
use crate::presentation::app_state::AppState;
use crate::presentation::document::DocumentView;
use crate::presentation::handlers::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_dashboard_config()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    // The document outlives the presenter; HTTP handlers read it
    let document = DocumentView::new();
    let mut presenter = DashboardPresenter::new(document.clone(), config.display.thresholds());
    presenter.mount();

    let channel = Arc::new(SseChannel::new(config.channel.url.clone()));
    let events = subscribe(channel, config.channel.reconnect_delay());
    let (commands, command_rx) = mpsc::channel(16);
    tokio::spawn(run_event_loop(presenter, events, command_rx, CLOCK_PERIOD));

    let state = Arc::new(AppState { document, commands });
    let router = build_router(state);

    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting weather dashboard on {}, channel {}", addr, config.channel.url);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
