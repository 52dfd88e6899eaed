use clap::Parser;
use log::{error, info, warn};

use calculator::{Config, Server};
use calculator_client::Format;

#[derive(Parser)]
#[command(name = "calculator")]
#[command(about = "Evaluates expression trees received over TCP")]
struct Cli {
    /// Exchange YAML payloads instead of JSON
    #[arg(long)]
    yaml: bool,
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = Config::from_env().expect("Failed to load configuration");
    if cli.yaml {
        config.format = Format::Yaml;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let handle = match Server::start(&config).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Serving {} requests on {}", config.format, handle.addr());

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }

    handle.shutdown().await.unwrap();

    match telemetry::encode() {
        Ok(metrics) => info!("Final metrics:\n{}", metrics),
        Err(e) => warn!("Failed to encode metrics: {}", e),
    }
}
