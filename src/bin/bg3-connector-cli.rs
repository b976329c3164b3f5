use bg3_connector::cli::{self, Cli};
use bg3_connector::config::LoggingSettings;
use bg3_connector::telemetry;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args = Cli::parse();

    let logging = LoggingSettings {
        level: if args.debug { "debug" } else { "warn" }.to_string(),
        format: "compact".to_string(),
    };
    telemetry::init_tracing(&logging)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let message = cli::run(args).await?;
    println!("{}", message);
    Ok(())
}
