use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

// 遊戲核心模組
mod config;
mod game;
mod server;
mod service;

use config::ServerConfig;
use service::simulate;

// ============================================================================
// 命令列
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "landlord_env")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve newline-delimited JSON over TCP (default)
    Serve,

    /// Play many games with a greedy policy and report the outcome
    Simulate {
        /// Number of games
        games: usize,

        /// Seed of the first game (game i uses seed + i)
        #[arg(default_value_t = 0)]
        seed: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = ServerConfig::from_env()?;

    match args.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let registry = Arc::new(server::build_registry(&config)?);
            let listener = TcpListener::bind(config.addr).await?;

            println!("LandlordEnv server listening on {}", config.addr);
            println!(
                "Rent schedule: {} floors, send one JSON request per line",
                config.rent_schedule.len()
            );

            server::serve(listener, registry).await?;
        }
        Commands::Simulate { games, seed } => {
            let schedule = config.rent_schedule.clone();
            let report =
                tokio::task::spawn_blocking(move || simulate(games, seed, &schedule)).await??;

            println!("{}", serde_json::to_string_pretty(&report)?);
            println!("Win rate: {:.1}%", report.win_rate() * 100.0);
        }
    }

    Ok(())
}
