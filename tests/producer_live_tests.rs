#![cfg(all(test, feature = "test_e2e"))]

use eventhub_publisher::{
    amqp::AmqpProducer,
    config::{CONNECTION_STRING_VAR, EVENT_HUB_NAME_VAR},
    event_data::synthetic_events,
    producer::{publish_events, PublishError},
    ConnectionOptions, CreateBatchOptions,
};

fn setup_dotenv() {
    let _ = dotenv::from_filename(".env");
}

async fn connect() -> AmqpProducer {
    setup_dotenv();

    let connection_string = std::env::var(CONNECTION_STRING_VAR).unwrap();
    let event_hub_name = std::env::var(EVENT_HUB_NAME_VAR).ok();
    AmqpProducer::from_connection_string(
        &connection_string,
        event_hub_name.as_deref(),
        ConnectionOptions::default(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn producer_can_connect_and_close() {
    let producer = connect().await;
    producer.close().await.unwrap();
}

#[tokio::test]
async fn producer_can_publish_a_batch_of_synthetic_events() {
    let producer = connect().await;

    let report = publish_events(producer, synthetic_events(50), CreateBatchOptions::default())
        .await
        .unwrap();

    assert_eq!(report.event_count, 50);
}

#[tokio::test]
async fn publish_fails_when_events_do_not_fit_small_batch() {
    let producer = connect().await;

    let options = CreateBatchOptions::new().with_max_size_in_bytes(256);
    let result = publish_events(producer, synthetic_events(1000), options).await;

    assert!(matches!(result, Err(PublishError::Pack(_))));
}
