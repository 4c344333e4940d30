//! Read-only HTTP view of the observer snapshot.

use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tokio::sync::watch;
use tracing::info;

use crate::simulation::{CountrySnapshot, ObserverSnapshot, WarSnapshot, WorldEvent};

pub type SharedObserver = Arc<RwLock<ObserverSnapshot>>;

fn read(observer: &SharedObserver) -> ObserverSnapshot {
    observer
        .read()
        .map(|snapshot| snapshot.clone())
        .unwrap_or_default()
}

async fn snapshot(State(observer): State<SharedObserver>) -> Json<ObserverSnapshot> {
    Json(read(&observer))
}

async fn wars(State(observer): State<SharedObserver>) -> Json<Vec<WarSnapshot>> {
    Json(read(&observer).wars)
}

async fn events(State(observer): State<SharedObserver>) -> Json<Vec<WorldEvent>> {
    Json(read(&observer).events)
}

async fn country(
    State(observer): State<SharedObserver>,
    Path(code): Path<String>,
) -> Result<Json<CountrySnapshot>, StatusCode> {
    read(&observer)
        .country(&code)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub fn router(observer: SharedObserver) -> Router {
    Router::new()
        .route("/snapshot", get(snapshot))
        .route("/wars", get(wars))
        .route("/events", get(events))
        .route("/countries/:code", get(country))
        .with_state(observer)
}

/// Serves the router until `shutdown` turns `true` or its sender is dropped.
pub async fn serve(
    addr: SocketAddr,
    observer: SharedObserver,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "observer API listening");
    axum::serve(listener, router(observer))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await?;
    Ok(())
}
