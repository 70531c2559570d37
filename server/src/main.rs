use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_server::{ServerConfig, ServerError, TodoStore};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    init_tracing();
    let config = ServerConfig::from_env()?;
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, id_strategy = ?config.id_strategy, "listening on http://{addr}/graphql");
    todo_server::run(listener, TodoStore::with_strategy(config.id_strategy)).await?;
    Ok(())
}
