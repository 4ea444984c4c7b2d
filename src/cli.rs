//! Command-line interface for live_tictactoe.

use clap::{Parser, Subcommand};

/// Live tic-tac-toe - two players, HTTP moves, WebSocket board updates
#[derive(Parser, Debug)]
#[command(name = "live_tictactoe")]
#[command(about = "Two-player tic-tac-toe server with live board updates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,
    },
}
