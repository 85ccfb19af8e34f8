use scribble::prelude::*;

#[tokio::main]
async fn main() -> Result<(), ScribbleError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let server = ScribbleServer::builder()
        .bind(&config.bind_addr())
        .game_config(config.game.clone())
        .words(config.load_words()?)
        .build()
        .await?;

    tracing::info!(addr = %server.local_addr()?, "listening");
    server.run().await
}
