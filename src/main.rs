//! Vintner - Main Entry Point
//!
//! Wine quality regression with train, serve, predict, and info modes.

use clap::Parser;
use vintner::cli::{cmd_info, cmd_predict, cmd_serve, cmd_train, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vintner=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            data,
            target,
            model,
            alpha,
            test_size,
            scale,
            k_best,
            seed,
            output,
        } => {
            cmd_train(
                &data, &target, &model, alpha, test_size, scale, k_best, seed, &output,
            )?;
        }
        Commands::Serve { host, port, model } => {
            cmd_serve(host, port, model).await?;
        }
        Commands::Predict { model, features } => {
            cmd_predict(&model, &features)?;
        }
        Commands::Info { model } => {
            cmd_info(&model)?;
        }
    }

    Ok(())
}
