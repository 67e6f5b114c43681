//! Web server command.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use vitalink_core::Broadcaster;
use vitalink_store::{MemoryUserStore, RedisUserStore, UserStore};
use vitalink_web::{state::AppState, ServerConfig};

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "VITALINK_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "VITALINK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Shared secret devices send as a bearer token
    #[arg(long, env = "VITALINK_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Redis URL for user records
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// Keep user records in memory instead of Redis
    #[arg(long)]
    pub memory: bool,

    /// Dashboard origin allowed to make credentialed requests
    #[arg(long, env = "FRONTEND_URL")]
    pub frontend_url: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (with --log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    if args.api_key.trim().is_empty() {
        bail!("API key must not be empty (set --api-key or VITALINK_API_KEY)");
    }

    let store: Arc<dyn UserStore> = if args.memory {
        info!("Using in-memory user store");
        Arc::new(MemoryUserStore::new())
    } else {
        let pool = vitalink_store::init_pool(&args.redis_url).await?;
        info!(redis_url = %args.redis_url, "Connected to Redis");
        Arc::new(RedisUserStore::new(pool))
    };

    let state = AppState::new(store, Broadcaster::new(), args.api_key.trim());

    println!();
    println!("  {} {}", "Vitalink".cyan().bold(), "Server".bold());
    println!();
    println!("  {}       http://{}:{}", "API".green(), args.host, args.port);
    println!("  {}  ws://{}:{}/ws", "WebSocket".green(), args.host, args.port);
    println!(
        "  {}      {}",
        "Store".green(),
        if args.memory { "memory" } else { args.redis_url.as_str() }
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        frontend_url: args.frontend_url,
    };
    vitalink_web::run_server(state, config).await?;

    Ok(())
}
