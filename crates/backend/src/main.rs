use color_eyre::eyre::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, services::ServeFile};
use tracing::info;

use hookboard_backend::{
    config::Config,
    routes,
    state::AppState,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_subscriber(get_subscriber());

    let config = Config::load()?;
    let state = AppState::new(&config)?;
    let cors = CorsLayer::permissive();

    let dashboard = ServeFile::new(config.server.static_dir.join("dashboard.html"));
    let app = routes::router()
        .route_service("/", dashboard)
        .layer(cors)
        .with_state(state);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("🚀 Hookboard dashboard server running at http://{bind_addr}");
    info!("📡 Webhook endpoint: http://{bind_addr}/webhook/receive");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
