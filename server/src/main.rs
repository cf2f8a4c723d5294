mod llm;
mod routes;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // LLM init is non-fatal: with no key the service stays up and every chat
    // request answers with a configuration error instead of crashing.
    let llm: Option<Arc<dyn llm::ProviderChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(
                provider = client.provider_name(),
                model = client.model(),
                "LLM client initialized"
            );
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured — chat requests will fail");
            None
        }
    };

    let state = state::AppState::new(llm);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "chat proxy listening");
    axum::serve(listener, app).await.expect("server failed");
}
