use dashboard_proxy::config::Config;
use dashboard_proxy::services::{database, MongoStore, UpstreamClient};
use dashboard_proxy::{create_app, AppState};
use dotenv::dotenv;
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    info!("Starting dashboard proxy");
    let config = Config::from_env()?;

    let client = database::connect_to_database(&config.mongo_uri).await?;
    let store = MongoStore::new(client.database(&config.db_name));
    store.ensure_indexes().await?;

    let upstream = UpstreamClient::new(&config.upstream_url, config.upstream_timeout)?;
    info!("Forwarding to upstream at {}", upstream.base_url());

    let app = create_app(AppState::new(Arc::new(store), upstream));
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        error!("Server error: {:?}", e);
    }

    client.shutdown().await;
    info!("MongoDB connection closed");
    served?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {:?}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {:?}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received, draining connections");
}
