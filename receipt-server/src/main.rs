use receipt_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before reading configuration
    dotenv::dotenv().ok();

    init_logger();

    tracing::info!("Task receipt server starting...");

    // Missing required settings are fatal before serving traffic
    let config = Config::from_env()?;

    let state = ServerState::initialize(&config)?;

    let server = Server::new(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
