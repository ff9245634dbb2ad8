use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use emission_report::config::RunArgs;
use emission_report::report::ReportGenerator;
use emission_report::rest_api::{run_server, AppState};
use emission_report::storage::BlobContainerClient;
use emission_report::weather::OpenWeatherClient;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Run(RunArgs),
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Version => {
            println!("emission-report v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Run(run_args) => run(run_args).await,
    }
}

fn init_tracing(json: bool) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    init_tracing(args.log_json);

    info!("Starting emission-report v{}", env!("CARGO_PKG_VERSION"));

    let account = args
        .storage_account()
        .context("invalid AZURE_STORAGE_CONNECTION_STRING")?;
    let store = BlobContainerClient::new(&account, args.storage_container.clone());
    info!(
        "Reports will be stored in container {} of account {}",
        store.container(),
        account.account_name
    );

    let weather = OpenWeatherClient::new(args.weather_config());
    info!("Temperatures will be looked up for {}", weather.city());

    let state = Arc::new(AppState {
        generator: ReportGenerator::new(Arc::new(weather), Arc::new(store)),
    });

    run_server(args.listen_addr, state)
        .await
        .context("REST API server failed")?;
    Ok(())
}
