//! Publishes one size-bounded batch of events to an Azure Event Hub.
//!
//! The interesting part of this crate is [`batch_filler::fill_batch`], which packs events
//! into a batch whose capacity only the transport knows about and fails on the first
//! event that does not fit. Everything around it (connection, authorization, sending) is
//! reached through [`producer::ProducerTransport`] and [`EventBatch`].
//!
//! # Example
//!
//! ```rust,no_run
//! use eventhub_publisher::{
//!     amqp::AmqpProducer, event_data::synthetic_events, producer::publish_events,
//!     ConnectionOptions, CreateBatchOptions,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let producer = AmqpProducer::from_connection_string(
//!     "Endpoint=sb://<namespace>.servicebus.windows.net/;SharedAccessKeyName=<name>;SharedAccessKey=<key>",
//!     Some("<event-hub>"),
//!     ConnectionOptions::default(),
//! )
//! .await?;
//! let report = publish_events(producer, synthetic_events(100), CreateBatchOptions::default()).await?;
//! println!("published {} events", report.event_count);
//! # Ok(())
//! # }
//! ```

pub(crate) mod constants;

pub mod amqp;
pub mod authorization;
pub mod batch_filler;
pub mod config;
pub mod event_data;
pub mod event_data_batch;
pub mod event_hubs_connection_option;
pub mod event_hubs_connection_string_properties;
pub mod producer;

pub use batch_filler::{fill_batch, PackError};
pub use event_data::EventData;
pub use event_data_batch::{CreateBatchOptions, EventBatch, TryAddError};
pub use event_hubs_connection_option::ConnectionOptions;
pub use event_hubs_connection_string_properties::EventHubsConnectionStringProperties;
