//! The batch abstraction filled by [`crate::fill_batch`].

use crate::event_data::EventData;

/// Error returned by [`EventBatch::try_add`]. The rejected event is handed back to the
/// caller in both cases.
#[derive(Debug, thiserror::Error)]
pub enum TryAddError {
    /// The event would push the batch past its size limit
    #[error("Batch is full")]
    BatchFull(EventData),

    /// The event could not be encoded by the transport
    #[error("Codec error: {source}")]
    Codec {
        /// The encoding error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        /// The event that failed to encode
        event: EventData,
    },
}

impl TryAddError {
    /// Returns the rejected event
    pub fn into_event(self) -> EventData {
        match self {
            TryAddError::BatchFull(event) => event,
            TryAddError::Codec { event, .. } => event,
        }
    }
}

/// A size-bounded, ordered container of events that is sent as one unit.
///
/// The capacity is decided by whoever creates the batch. [`EventBatch::try_add`] alone
/// decides whether an event still fits once its encoded size and framing overhead are
/// counted.
#[cfg_attr(test, mockall::automock)]
pub trait EventBatch {
    /// Appends the event if it fits, otherwise returns it inside the error.
    fn try_add(&mut self, event: EventData) -> Result<(), TryAddError>;

    /// Number of events in the batch
    fn len(&self) -> usize;

    /// Whether the batch holds no events
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the batch in bytes, framing included
    fn size_in_bytes(&self) -> u64;

    /// Size limit of the batch in bytes
    fn max_size_in_bytes(&self) -> u64;
}

/// The set of options that can be specified when creating a batch
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct CreateBatchOptions {
    /// The maximum size to allow for the batch, in bytes. `None` uses the largest size the
    /// link allows.
    pub max_size_in_bytes: Option<u64>,
}

impl CreateBatchOptions {
    /// Creates a new instance of [`CreateBatchOptions`] with default values
    pub fn new() -> Self {
        Default::default()
    }

    /// Limits the size of the batch
    pub fn with_max_size_in_bytes(mut self, max_size_in_bytes: u64) -> Self {
        self.max_size_in_bytes = Some(max_size_in_bytes);
        self
    }
}
