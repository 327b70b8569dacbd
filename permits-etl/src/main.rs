use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use permits_etl::{Dependencies, EtlError, PipelineSettings};

async fn run() -> Result<(), EtlError> {
    let settings = PipelineSettings::from_env()?;
    let dependencies = Dependencies::new(&settings).await?;

    info!("Starting permits ETL pipeline");
    dependencies.orchestrator.run().await?;
    info!("Pipeline finished");

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "Pipeline failed");
        std::process::exit(1);
    }
}
