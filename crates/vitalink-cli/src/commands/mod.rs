//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod serve;
pub mod simulate;

/// Vitalink - live health readings from devices to dashboards
#[derive(Parser)]
#[command(name = "vitalink")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API and live-reading server
    Serve(serve::ServeArgs),

    /// Stream simulated readings to a running server
    Simulate(simulate::SimulateArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Simulate(args) => simulate::execute(args).await,
        }
    }
}
