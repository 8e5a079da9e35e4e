//! Packs events into a single batch.

use crate::{
    event_data::EventData,
    event_data_batch::{EventBatch, TryAddError},
};

/// Error returned by [`fill_batch`] for the first event the batch did not accept.
///
/// Events accepted before the rejected one stay in the batch.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// The event would exceed the size limit of the batch
    #[error("Event at index {index} is too large for the batch and cannot be sent")]
    BatchFull {
        /// Zero-based position of the event in the input sequence
        index: usize,
        /// The rejected event
        event: EventData,
    },

    /// The event could not be encoded
    #[error("Event at index {index} could not be encoded")]
    Codec {
        /// Zero-based position of the event in the input sequence
        index: usize,
        /// The encoding error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl PackError {
    /// Zero-based position of the rejected event
    pub fn index(&self) -> usize {
        match self {
            PackError::BatchFull { index, .. } => *index,
            PackError::Codec { index, .. } => *index,
        }
    }
}

/// Adds `events` to `batch` in order and returns how many were added.
///
/// Fails on the first rejected event without touching the rest of the sequence. There is no
/// reordering, splitting or retry.
pub fn fill_batch<B, I>(batch: &mut B, events: I) -> Result<usize, PackError>
where
    B: EventBatch + ?Sized,
    I: IntoIterator<Item = EventData>,
{
    let mut added = 0;
    for (index, event) in events.into_iter().enumerate() {
        match batch.try_add(event) {
            Ok(()) => {
                added += 1;
                log::trace!("Added event at index {} to batch", index);
            }
            Err(TryAddError::BatchFull(event)) => {
                log::error!(
                    "Event at index {} does not fit in batch ({} of {} bytes used)",
                    index,
                    batch.size_in_bytes(),
                    batch.max_size_in_bytes()
                );
                return Err(PackError::BatchFull { index, event });
            }
            Err(TryAddError::Codec { source, .. }) => {
                log::error!("Failed to encode event at index {}: {:?}", index, source);
                return Err(PackError::Codec { index, source });
            }
        }
    }
    Ok(added)
}
