use crate::batch_filler::PackError;

/// Error returned by [`crate::producer::publish_events`]
#[derive(Debug, thiserror::Error)]
pub enum PublishError<E>
where
    E: std::error::Error + 'static,
{
    /// The transport failed to create a batch
    #[error("Failed to create batch: {0}")]
    CreateBatch(#[source] E),

    /// An event could not be added to the batch
    #[error(transparent)]
    Pack(#[from] PackError),

    /// The transport failed to send the batch
    #[error("Failed to send batch: {0}")]
    Send(#[source] E),

    /// The batch was sent but the transport failed to close
    #[error("Failed to close transport: {0}")]
    Close(#[source] E),
}
