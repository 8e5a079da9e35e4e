use eventhub_publisher::{
    amqp::AmqpProducer, config::PublisherConfig, event_data::synthetic_events,
    producer::publish_events,
};
use time::OffsetDateTime;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let _ = dotenv::from_filename(".env");

    let config = PublisherConfig::from_env()?;
    let producer = AmqpProducer::from_connection_string(
        &config.connection_string,
        config.event_hub_name.as_deref(),
        config.connection_options,
    )
    .await?;
    log::info!(
        "Connected to {}/{}",
        producer.fully_qualified_namespace(),
        producer.event_hub_name()
    );

    let report = publish_events(
        producer,
        synthetic_events(config.event_count),
        config.batch_options,
    )
    .await?;
    log::info!(
        "Time: {} A batch of {} events ({} bytes) has been published.",
        OffsetDateTime::now_utc(),
        report.event_count,
        report.size_in_bytes
    );

    Ok(())
}
