use fe2o3_amqp_types::messaging::{Batch, Data, Message};

use crate::{
    event_data::EventData,
    event_data_batch::{EventBatch, TryAddError},
};

use super::amqp_message_converter::{build_batch_envelope, data_section_size, encode_event};

/// A batch of events encoded for an AMQP link.
///
/// Each event is encoded when it is added, so the size kept here is the exact size of the
/// envelope body that is eventually sent.
#[derive(Debug)]
pub struct AmqpEventBatch {
    max_size_in_bytes: u64,
    size_in_bytes: u64,
    encoded_events: Vec<Vec<u8>>,
}

impl AmqpEventBatch {
    /// Creates an empty batch that is not tied to a link.
    /// [`crate::amqp::AmqpProducer::create_batch`] is the usual way to get one.
    pub fn new(max_size_in_bytes: u64) -> Self {
        Self {
            max_size_in_bytes,
            size_in_bytes: 0,
            encoded_events: Vec::new(),
        }
    }

    pub(crate) fn into_envelope(self) -> Message<Batch<Data>> {
        build_batch_envelope(self.encoded_events)
    }
}

impl EventBatch for AmqpEventBatch {
    fn try_add(&mut self, event: EventData) -> Result<(), TryAddError> {
        let encoded = match encode_event(&event) {
            Ok(encoded) => encoded,
            Err(err) => {
                return Err(TryAddError::Codec {
                    source: Box::new(err),
                    event,
                })
            }
        };

        let size = data_section_size(encoded.len());
        if self.size_in_bytes + size > self.max_size_in_bytes {
            return Err(TryAddError::BatchFull(event));
        }

        self.size_in_bytes += size;
        self.encoded_events.push(encoded);
        Ok(())
    }

    fn len(&self) -> usize {
        self.encoded_events.len()
    }

    fn size_in_bytes(&self) -> u64 {
        self.size_in_bytes
    }

    fn max_size_in_bytes(&self) -> u64 {
        self.max_size_in_bytes
    }
}
