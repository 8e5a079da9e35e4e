use crate::{
    batch_filler::fill_batch,
    event_data::EventData,
    event_data_batch::{CreateBatchOptions, EventBatch},
};

use super::{error::PublishError, producer_transport::ProducerTransport};

/// Outcome of a successful [`publish_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishReport {
    /// Number of events sent
    pub event_count: usize,
    /// Size of the sent batch in bytes
    pub size_in_bytes: u64,
}

/// Creates one batch, fills it with `events`, sends it and closes the transport.
///
/// The transport is closed on every path, including when filling or sending fails. If both
/// the operation and the close fail, the error of the operation is returned and the close
/// error is logged.
pub async fn publish_events<T, I>(
    mut transport: T,
    events: I,
    options: CreateBatchOptions,
) -> Result<PublishReport, PublishError<T::Error>>
where
    T: ProducerTransport,
    I: IntoIterator<Item = EventData>,
{
    let outcome = fill_and_send(&mut transport, events, options).await;

    log::info!("Closing the producer and cleaning up");
    let closed = transport.close().await;

    match (outcome, closed) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(err)) => Err(PublishError::Close(err)),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            log::error!("Failed to close producer after error: {:?}", close_err);
            Err(err)
        }
    }
}

async fn fill_and_send<T, I>(
    transport: &mut T,
    events: I,
    options: CreateBatchOptions,
) -> Result<PublishReport, PublishError<T::Error>>
where
    T: ProducerTransport,
    I: IntoIterator<Item = EventData>,
{
    let mut batch = transport
        .create_batch(options)
        .await
        .map_err(PublishError::CreateBatch)?;
    log::debug!(
        "Created batch with a limit of {} bytes",
        batch.max_size_in_bytes()
    );

    let event_count = fill_batch(&mut batch, events)?;
    let size_in_bytes = batch.size_in_bytes();

    transport
        .send_batch(batch)
        .await
        .map_err(PublishError::Send)?;

    Ok(PublishReport {
        event_count,
        size_in_bytes,
    })
}
