use fe2o3_amqp::{
    connection::ConnectionHandle, session::SessionHandle, Connection, Sendable, Sender, Session,
};
use fe2o3_amqp_types::messaging::Outcome;
use uuid::Uuid;

use crate::{
    authorization::{build_audience_resource, SharedAccessCredential, SharedAccessSignature},
    constants::{AMQPS_PORT, AMQPS_SCHEME, AMQP_BATCH_MESSAGE_FORMAT},
    event_data_batch::{CreateBatchOptions, EventBatch},
    event_hubs_connection_option::ConnectionOptions,
    event_hubs_connection_string_properties::{
        ConnectionStringError, EventHubsConnectionStringProperties,
    },
    producer::ProducerTransport,
};

use super::{amqp_cbs_link, amqp_event_batch::AmqpEventBatch, error::AmqpProducerError};

/// A producer bound to one Event Hub over a single AMQP connection, session and sender link.
///
/// The producer is an owned resource: pass it to [`crate::producer::publish_events`], which
/// closes it on every path, or call [`AmqpProducer::close`] yourself. Dropping it without
/// closing stops the underlying connection engine without a graceful close handshake.
#[derive(Debug)]
pub struct AmqpProducer {
    connection: ConnectionHandle<()>,
    session: SessionHandle<()>,
    sender: Sender,
    fully_qualified_namespace: String,
    event_hub_name: String,
    max_message_size_in_bytes: u64,
}

impl AmqpProducer {
    /// Connects using an Event Hubs connection string.
    ///
    /// `event_hub_name` may be omitted if the connection string carries an `EntityPath`.
    pub async fn from_connection_string(
        connection_string: &str,
        event_hub_name: Option<&str>,
        options: ConnectionOptions,
    ) -> Result<Self, AmqpProducerError> {
        let properties = EventHubsConnectionStringProperties::parse(connection_string)?;
        let event_hub_name = properties.validate(event_hub_name)?;
        let fully_qualified_namespace = properties
            .fully_qualified_namespace()
            .ok_or(ConnectionStringError::MissingEndpoint)?
            .to_string();

        let credential = match (
            properties.shared_access_key_name(),
            properties.shared_access_key(),
            properties.shared_access_signature(),
        ) {
            (Some(key_name), Some(key), _) => SharedAccessCredential::from_key(key_name, key),
            (_, _, Some(signature)) => {
                SharedAccessCredential::from(SharedAccessSignature::try_from_signature(signature)?)
            }
            _ => return Err(ConnectionStringError::MissingCredential.into()),
        };

        Self::connect(&fully_qualified_namespace, &event_hub_name, credential, options).await
    }

    /// Opens the connection, authorizes the Event Hub and attaches a sender link to it.
    pub async fn connect(
        fully_qualified_namespace: &str,
        event_hub_name: &str,
        credential: SharedAccessCredential,
        options: ConnectionOptions,
    ) -> Result<Self, AmqpProducerError> {
        let (host, port) = match &options.custom_endpoint_address {
            Some(url) => (
                url.host_str().unwrap_or(fully_qualified_namespace),
                url.port().unwrap_or(AMQPS_PORT),
            ),
            None => (fully_qualified_namespace, AMQPS_PORT),
        };
        let url = format!("{}://{}:{}", AMQPS_SCHEME, host, port);
        let idle_time_out =
            u32::try_from(options.connection_idle_timeout.as_millis()).unwrap_or(u32::MAX);
        let container_id = format!("eventhub-publisher-{}", Uuid::new_v4());

        log::debug!("Opening connection {} to {}", container_id, url);
        let mut connection = Connection::builder()
            .container_id(container_id)
            .hostname(fully_qualified_namespace)
            .alt_tls_establishment(true)
            .idle_time_out(idle_time_out)
            .open(url.as_str())
            .await?;

        match Self::open_link(
            &mut connection,
            fully_qualified_namespace,
            event_hub_name,
            &credential,
        )
        .await
        {
            Ok((session, sender)) => {
                let max_message_size_in_bytes = effective_max_message_size(
                    options.max_message_size_in_bytes,
                    sender.max_message_size(),
                );
                log::debug!(
                    "Sender link allows messages of up to {} bytes",
                    max_message_size_in_bytes
                );
                Ok(Self {
                    connection,
                    session,
                    sender,
                    fully_qualified_namespace: fully_qualified_namespace.to_string(),
                    event_hub_name: event_hub_name.to_string(),
                    max_message_size_in_bytes,
                })
            }
            Err(err) => {
                if let Err(close_err) = connection.close().await {
                    log::error!(
                        "Found error closing connection after failed open: {:?}",
                        close_err
                    );
                }
                Err(err)
            }
        }
    }

    async fn open_link(
        connection: &mut ConnectionHandle<()>,
        fully_qualified_namespace: &str,
        event_hub_name: &str,
        credential: &SharedAccessCredential,
    ) -> Result<(SessionHandle<()>, Sender), AmqpProducerError> {
        let mut session = Session::begin(connection).await?;

        let resource = build_audience_resource(fully_qualified_namespace, event_hub_name);
        let signature = credential.signature_for(&resource)?;
        amqp_cbs_link::authorize(&mut session, &resource, &signature).await?;

        let link_name = format!("{}-sender-{}", event_hub_name, Uuid::new_v4());
        log::debug!("Attaching sender link {} to {}", link_name, resource);
        let sender = Sender::attach(&mut session, link_name, resource.as_str()).await?;

        Ok((session, sender))
    }

    /// The fully qualified namespace the producer is connected to
    pub fn fully_qualified_namespace(&self) -> &str {
        &self.fully_qualified_namespace
    }

    /// The Event Hub the producer sends to
    pub fn event_hub_name(&self) -> &str {
        &self.event_hub_name
    }

    /// Creates an empty batch. Its size limit is the smaller of the requested size and the
    /// largest message the link allows.
    pub fn create_batch(
        &self,
        options: CreateBatchOptions,
    ) -> Result<AmqpEventBatch, AmqpProducerError> {
        let max_size_in_bytes =
            batch_size_limit(options.max_size_in_bytes, self.max_message_size_in_bytes)?;
        Ok(AmqpEventBatch::new(max_size_in_bytes))
    }

    /// Sends all events of the batch in one transfer and waits for the outcome.
    pub async fn send_batch(&mut self, batch: AmqpEventBatch) -> Result<(), AmqpProducerError> {
        if batch.is_empty() {
            log::debug!("Skipping send of empty batch");
            return Ok(());
        }

        log::debug!(
            "Sending batch of {} events ({} bytes) to {}",
            batch.len(),
            batch.size_in_bytes(),
            self.event_hub_name
        );
        let sendable = Sendable::builder()
            .message(batch.into_envelope())
            .message_format(AMQP_BATCH_MESSAGE_FORMAT)
            .settled(false)
            .build();

        match self.sender.send(sendable).await? {
            Outcome::Accepted(_) => Ok(()),
            other => Err(AmqpProducerError::NotAccepted(format!("{:?}", other))),
        }
    }

    /// Detaches the sender, ends the session and closes the connection.
    ///
    /// Every step is attempted; the first error is returned.
    pub async fn close(mut self) -> Result<(), AmqpProducerError> {
        log::debug!("Closing producer for {}", self.event_hub_name);

        let detached = self.sender.close().await.map_err(AmqpProducerError::from);
        let ended = self.session.end().await.map_err(AmqpProducerError::from);
        let closed = self.connection.close().await.map_err(AmqpProducerError::from);

        let mut first_error = None;
        for result in [detached, ended, closed] {
            if let Err(err) = result {
                log::error!("Found error closing producer: {:?}", err);
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The smaller of the configured limit and the max-message-size the remote peer announced
/// on attach. A peer limit of `None` or `0` means the link does not impose one.
fn effective_max_message_size(configured: u64, link: Option<u64>) -> u64 {
    match link {
        Some(link) if link > 0 => configured.min(link),
        _ => configured,
    }
}

/// Size limit of a new batch. `None` uses the whole link limit.
fn batch_size_limit(requested: Option<u64>, link_max: u64) -> Result<u64, AmqpProducerError> {
    match requested {
        Some(requested) if requested > link_max => {
            Err(AmqpProducerError::BatchSizeExceedsLinkLimit {
                requested,
                max: link_max,
            })
        }
        Some(requested) => Ok(requested),
        None => Ok(link_max),
    }
}

impl ProducerTransport for AmqpProducer {
    type Batch = AmqpEventBatch;
    type Error = AmqpProducerError;

    async fn create_batch(
        &mut self,
        options: CreateBatchOptions,
    ) -> Result<Self::Batch, Self::Error> {
        AmqpProducer::create_batch(self, options)
    }

    async fn send_batch(&mut self, batch: Self::Batch) -> Result<(), Self::Error> {
        AmqpProducer::send_batch(self, batch).await
    }

    async fn close(self) -> Result<(), Self::Error> {
        AmqpProducer::close(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_limit_defaults_to_link_maximum() {
        assert_eq!(batch_size_limit(None, 1024).unwrap(), 1024);
    }

    #[test]
    fn batch_size_limit_accepts_requested_size_up_to_link_maximum() {
        assert_eq!(batch_size_limit(Some(512), 1024).unwrap(), 512);
        assert_eq!(batch_size_limit(Some(1024), 1024).unwrap(), 1024);
    }

    #[test]
    fn batch_size_limit_rejects_requested_size_above_link_maximum() {
        let err = batch_size_limit(Some(1025), 1024).unwrap_err();
        assert!(matches!(
            err,
            AmqpProducerError::BatchSizeExceedsLinkLimit {
                requested: 1025,
                max: 1024
            }
        ));
    }

    #[test]
    fn smaller_link_limit_wins_over_configured_limit() {
        assert_eq!(
            effective_max_message_size(1024 * 1024, Some(256 * 1024)),
            256 * 1024
        );
    }

    #[test]
    fn smaller_configured_limit_wins_over_link_limit() {
        assert_eq!(effective_max_message_size(1024, Some(256 * 1024)), 1024);
    }

    #[test]
    fn missing_or_zero_link_limit_keeps_configured_limit() {
        assert_eq!(effective_max_message_size(1024, None), 1024);
        assert_eq!(effective_max_message_size(1024, Some(0)), 1024);
    }
}
