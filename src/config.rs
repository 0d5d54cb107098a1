//! Runtime configuration.
//!
//! Every flag can also come from a `TODOLIST_*` environment variable; flags
//! win over the environment. The log filter additionally honours `RUST_LOG`,
//! which wins over `--log-level`.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::todo::{IdStrategy, TodoStore};

#[derive(Clone, Debug, Parser)]
#[command(name = "todolist", version, about = "In-memory todo-list service, JSON over HTTP")]
pub struct Config {
    /// Socket address to listen on.
    #[arg(long, env = "TODOLIST_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: SocketAddr,

    /// How new todos are numbered.
    #[arg(long, env = "TODOLIST_ID_STRATEGY", value_enum, default_value_t = IdStrategy::Sequential)]
    pub id_strategy: IdStrategy,

    /// Start with an empty list instead of the two starter records.
    #[arg(long, env = "TODOLIST_NO_SEED")]
    pub no_seed: bool,

    /// Default log level when `RUST_LOG` is unset.
    #[arg(long, env = "TODOLIST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// The store this configuration starts the service with.
    pub fn store(&self) -> TodoStore {
        if self.no_seed {
            TodoStore::new(self.id_strategy)
        } else {
            TodoStore::seeded(self.id_strategy)
        }
    }

    /// `RUST_LOG` if set and valid, otherwise `--log-level`.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}
