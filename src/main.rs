use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use railquote::cli::{Cli, Commands};
use railquote::commands::{predict, quote, serve, stations};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => serve::run(host, port).await,
        Commands::Predict { args } => {
            return ExitCode::from(predict::run(&args, &mut io::stdout(), &mut io::stderr()));
        }
        Commands::Quote {
            from,
            to,
            distance,
            weight,
            api_url,
            deterministic,
        } => {
            let args = quote::QuoteArgs {
                from,
                to,
                distance,
                weight,
                api_url,
                deterministic,
            };
            quote::run(args, &mut io::stdout()).await
        }
        Commands::Stations => stations::run(&mut io::stdout()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}
