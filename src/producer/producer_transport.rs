use crate::event_data_batch::{CreateBatchOptions, EventBatch};

/// The client side of a message hub as seen by [`crate::producer::publish_events`].
///
/// Batches are moved into [`ProducerTransport::send_batch`], so a batch cannot be changed
/// once it is being sent and cannot be sent twice. [`ProducerTransport::close`] consumes
/// the transport, so it runs at most once.
#[allow(async_fn_in_trait)]
pub trait ProducerTransport {
    /// Batch type created by this transport
    type Batch: EventBatch;

    /// Error returned by the transport operations
    type Error: std::error::Error + 'static;

    /// Creates an empty batch whose size limit is decided by the transport
    async fn create_batch(
        &mut self,
        options: CreateBatchOptions,
    ) -> Result<Self::Batch, Self::Error>;

    /// Sends all events in the batch as one unit
    async fn send_batch(&mut self, batch: Self::Batch) -> Result<(), Self::Error>;

    /// Releases the resources held by the transport
    async fn close(self) -> Result<(), Self::Error>;
}
