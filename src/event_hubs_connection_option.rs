use std::time::Duration;
use url::Url;

use crate::constants::DEFAULT_MAX_MESSAGE_SIZE_IN_BYTES;

/// The set of options that can be specified when connecting a [`crate::amqp::AmqpProducer`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionOptions {
    /// The amount of time to allow a connection to have no observed traffic before considering it idle
    pub connection_idle_timeout: Duration,

    /// The custom address to use for establishing a connection to the Event Hubs service,
    /// eg. an application gateway in front of the namespace
    pub custom_endpoint_address: Option<Url>,

    /// The largest message the Event Hub accepts. Batches created by the producer never
    /// exceed this size.
    pub max_message_size_in_bytes: u64,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            connection_idle_timeout: Duration::from_secs(60),
            custom_endpoint_address: Default::default(),
            max_message_size_in_bytes: DEFAULT_MAX_MESSAGE_SIZE_IN_BYTES,
        }
    }
}

impl ConnectionOptions {
    /// Create a new instance of [`ConnectionOptions`] with default values
    pub fn new() -> Self {
        Default::default()
    }
}
