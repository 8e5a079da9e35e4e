//! Publishing a single batch through a transport.

mod error;
mod producer_transport;
mod publish;

pub use error::PublishError;
pub use producer_transport::ProducerTransport;
pub use publish::{publish_events, PublishReport};

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use crate::{batch_filler::tests::FixedCapacityBatch, CreateBatchOptions, EventBatch};

    use super::ProducerTransport;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    pub(crate) struct FakeTransportError(pub(crate) &'static str);

    /// Call counters shared with the test after the transport has been moved.
    #[derive(Debug, Default, Clone)]
    pub(crate) struct CallCounts {
        pub(crate) create_batch: Arc<AtomicUsize>,
        pub(crate) send_batch: Arc<AtomicUsize>,
        pub(crate) close: Arc<AtomicUsize>,
        pub(crate) sent_events: Arc<AtomicUsize>,
    }

    impl CallCounts {
        pub(crate) fn get(counter: &Arc<AtomicUsize>) -> usize {
            counter.load(Ordering::SeqCst)
        }
    }

    #[derive(Debug)]
    pub(crate) struct FakeTransport {
        pub(crate) capacity: u64,
        pub(crate) fail_create: bool,
        pub(crate) fail_send: bool,
        pub(crate) fail_close: bool,
        pub(crate) counts: CallCounts,
    }

    impl FakeTransport {
        pub(crate) fn new(capacity: u64) -> Self {
            Self {
                capacity,
                fail_create: false,
                fail_send: false,
                fail_close: false,
                counts: CallCounts::default(),
            }
        }
    }

    impl ProducerTransport for FakeTransport {
        type Batch = FixedCapacityBatch;
        type Error = FakeTransportError;

        async fn create_batch(
            &mut self,
            options: CreateBatchOptions,
        ) -> Result<Self::Batch, Self::Error> {
            self.counts.create_batch.fetch_add(1, Ordering::SeqCst);
            if self.fail_create {
                return Err(FakeTransportError("create failed"));
            }
            let capacity = options
                .max_size_in_bytes
                .map(|size| size.min(self.capacity))
                .unwrap_or(self.capacity);
            Ok(FixedCapacityBatch::new(capacity, 0))
        }

        async fn send_batch(&mut self, batch: Self::Batch) -> Result<(), Self::Error> {
            self.counts.send_batch.fetch_add(1, Ordering::SeqCst);
            if self.fail_send {
                return Err(FakeTransportError("send failed"));
            }
            self.counts
                .sent_events
                .fetch_add(batch.len(), Ordering::SeqCst);
            Ok(())
        }

        async fn close(self) -> Result<(), Self::Error> {
            self.counts.close.fetch_add(1, Ordering::SeqCst);
            if self.fail_close {
                return Err(FakeTransportError("close failed"));
            }
            Ok(())
        }
    }
}
