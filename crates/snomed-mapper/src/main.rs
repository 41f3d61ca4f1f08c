//! Clinical drug to MPF/MP mapping binary.

use snomed_client::SnowstormClient;
use snomed_mapper::{ConceptResolver, FileSink, MapperConfig, MappingRun};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = MapperConfig::from_env();
    tracing::info!(
        "Mapping reference set {} on {}{}",
        config.refset_id,
        config.client.base_url,
        config.client.branch
    );

    let client = SnowstormClient::new(config.client.clone())?;
    let candidates = client
        .refset_clinical_drugs(&config.refset_id, config.query_limit)
        .await?;

    let sink = FileSink::create(&config.output_dir)?;
    tracing::info!("Writing results to {}", sink.dir().display());

    let resolver = ConceptResolver::with_limit(&client, config.query_limit);
    let mut run = MappingRun::new(resolver, sink);
    let outcome = run.run(candidates).await?;

    tracing::info!("Finished: {}", outcome.summary());
    Ok(())
}
