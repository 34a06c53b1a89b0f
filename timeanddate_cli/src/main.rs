mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use timeanddate_api::{Authentication, Client};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "timeanddate")]
#[command(about = "Query the timeanddate.com Services API")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Access key for the Services API
    #[arg(long, env = "TAD_ACCESS_KEY", hide_env_values = true)]
    access_key: String,

    /// Secret key for the Services API
    #[arg(long, env = "TAD_SECRET_KEY", hide_env_values = true)]
    secret_key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List daylight-saving-time information by country and/or year
    Dstlist(commands::dstlist::DstlistArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("timeanddate_api=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let auth = Authentication::new(&cli.access_key, &cli.secret_key);
    let client = Client::new(auth);

    match &cli.command {
        Commands::Dstlist(args) => commands::dstlist::run(args, client, &format).await?,
    }

    Ok(())
}
