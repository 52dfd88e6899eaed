use clap::Parser;
use log::error;

use calculator_client::Format;
use gateway::{prompt, CalculatorClient, Config};

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "Reads arithmetic expressions and evaluates them on a remote calculator")]
struct Cli {
    /// Exchange YAML payloads instead of JSON
    #[arg(long)]
    yaml: bool,
    /// Port of the evaluator
    #[arg(long)]
    port: Option<u16>,
    /// Start an evaluator inside this process first
    #[arg(long)]
    serve: bool,
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

    let evaluator = if cli.serve {
        let evaluator_config = calculator::Config {
            port: config.port,
            format: config.format,
            max_payload: config.max_payload,
            ..calculator::Config::from_env().expect("Failed to load evaluator configuration")
        };

        match calculator::Server::start(&evaluator_config).await {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let client = CalculatorClient::new(&config);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    if let Err(e) = prompt::run(&client, stdin, &mut stdout).await {
        error!("Prompt failed: {}", e);
    }

    if let Some(handle) = evaluator {
        handle.shutdown().await.unwrap();
    }
}
