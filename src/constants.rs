use std::time::Duration;

/// The maximum allowable length of a message id.
pub(crate) const MAX_MESSAGE_ID_LENGTH: usize = 128;

/// Token type used when presenting a shared access signature to the CBS node.
pub(crate) const SAS_TOKEN_TYPE: &str = "servicebus.windows.net:sastoken";

/// URI scheme of the AMQP over TLS transport.
pub(crate) const AMQPS_SCHEME: &str = "amqps";

/// Port of the AMQP over TLS transport.
pub(crate) const AMQPS_PORT: u16 = 5671;

/// Message format of a batch envelope whose `Data` sections each carry one encoded message.
pub(crate) const AMQP_BATCH_MESSAGE_FORMAT: u32 = 0x8001_3700;

/// Default message size limit of a standard tier Event Hub.
pub(crate) const DEFAULT_MAX_MESSAGE_SIZE_IN_BYTES: u64 = 1024 * 1024;

/// Validity of a signature generated from a shared access key.
pub(crate) const DEFAULT_SAS_TOKEN_VALIDITY: Duration = Duration::from_secs(60 * 60);

pub(crate) const MAXIMUM_KEY_NAME_LENGTH: usize = 256;

pub(crate) const MAXIMUM_KEY_LENGTH: usize = 256;

/// Number of synthetic events published when nothing else is configured.
pub(crate) const DEFAULT_EVENT_COUNT: usize = 50_000;
