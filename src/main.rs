use std::{path::Path, sync::Arc};

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strandstuebchen_api::{config::Config, db::FileStore, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let store = FileStore::new(&config.data_file);
    info!("Daily state stored in {}", store.path().display());

    let state = AppState {
        store: Arc::new(store),
        config: config.clone(),
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    // Everything that is not an API route is the static site, with
    // index.html answering unknown paths.
    let public = Path::new(&config.public_dir);
    let site = ServeDir::new(public).fallback(ServeFile::new(public.join("index.html")));

    let app = router(state)
        .fallback_service(site)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Strandstübchen API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
