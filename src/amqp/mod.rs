//! AMQP 1.0 transport for Azure Event Hubs.

mod amqp_cbs_link;
mod amqp_event_batch;
mod amqp_message_converter;
mod amqp_message_extension;
mod amqp_producer;
mod error;

pub use amqp_event_batch::AmqpEventBatch;
pub use amqp_producer::AmqpProducer;
pub use error::AmqpProducerError;
