//! EduManage CLI
//!
//! Command-line interface for administering an EduManage server.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "edumanage")]
#[command(about = "EduManage school administration CLI", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, env = "EDUMANAGE_URL", default_value = "http://localhost:8080")]
    server_url: String,

    /// Account to log in with
    #[arg(short, long, env = "EDUMANAGE_USERNAME")]
    username: Option<String>,

    /// Password of the account
    #[arg(short, long, env = "EDUMANAGE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        username: cli.username,
        password: cli.password,
        json: cli.json,
    };

    handle_command(cli.command, &config).await
}
