use std::sync::Arc;

use clap::Parser;
use todolist::todo::TodoService;
use todolist::{Config, Error, Server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    info!(id_strategy = ?config.id_strategy, seeded = !config.no_seed, "starting todolist");

    let service = Arc::new(TodoService::new(config.store()));
    Server::bind(config.addr).serve(todolist::app(service)).await
}
