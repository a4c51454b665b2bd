use server::config::ServerConfig;
use server::db::AppState;

#[tokio::main]
async fn main() {
    server::telemetry::init_tracing();
    server::health::record_start_time();

    let config = ServerConfig::from_env();
    let state = AppState::new();
    let app = server::rest::app(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .expect("Failed to bind server address");
    tracing::info!(
        "judgment core listening on {}",
        listener.local_addr().expect("listener has no local addr")
    );
    axum::serve(listener, app).await.expect("Server error");
}
