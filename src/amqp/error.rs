use fe2o3_amqp::{
    connection::OpenError,
    link::{DetachError, SendError, SenderAttachError},
    session::BeginError,
};

use crate::{
    authorization::SasError,
    event_hubs_connection_string_properties::ConnectionStringError,
};

/// Error of the AMQP producer
#[derive(Debug, thiserror::Error)]
pub enum AmqpProducerError {
    /// The connection string is invalid
    #[error(transparent)]
    ConnectionString(#[from] ConnectionStringError),

    /// A shared access signature could not be created
    #[error(transparent)]
    Sas(#[from] SasError),

    /// The connection could not be opened
    #[error(transparent)]
    Open(#[from] OpenError),

    /// The session could not be started
    #[error(transparent)]
    Begin(#[from] BeginError),

    /// The CBS node did not accept the token
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// The sender link could not be attached
    #[error(transparent)]
    Attach(#[from] SenderAttachError),

    /// The batch could not be transferred
    #[error(transparent)]
    Send(#[from] SendError),

    /// The service settled the batch with an outcome other than accepted
    #[error("The batch was not accepted: {0}")]
    NotAccepted(String),

    /// The requested batch size is larger than the link allows
    #[error("The requested batch size {requested} exceeds the maximum message size {max}")]
    BatchSizeExceedsLinkLimit {
        /// Requested size in bytes
        requested: u64,
        /// Largest message the link allows
        max: u64,
    },

    /// The sender link could not be detached
    #[error(transparent)]
    Detach(#[from] DetachError),

    /// The session could not be ended
    #[error(transparent)]
    EndSession(#[from] fe2o3_amqp::session::Error),

    /// The connection could not be closed
    #[error(transparent)]
    CloseConnection(#[from] fe2o3_amqp::connection::Error),
}
