//! The outbound message type.

use crate::constants::MAX_MESSAGE_ID_LENGTH;

/// Error returned by [`EventData::set_message_id`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetMessageIdError {
    /// The message id is empty
    #[error("The message id cannot be empty")]
    Empty,

    /// The message id is longer than the service allows
    #[error("The message id length {actual} exceeds the maximum of {max}")]
    MaxLengthExceeded {
        /// Length of the rejected id
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}

/// An event to be published to an Event Hub.
///
/// The body is an opaque byte payload. The optional properties map onto the AMQP
/// `properties` section of the message that is eventually sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EventData {
    body: Vec<u8>,
    message_id: Option<String>,
    correlation_id: Option<String>,
    content_type: Option<String>,
}

impl EventData {
    /// Creates a new event from a byte payload
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    /// The payload of the event
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the event and returns its payload
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// The application-defined identifier of the event, if any
    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    /// Sets the message id.
    ///
    /// Returns `Err(_)` if the id is empty or longer than 128 bytes.
    pub fn set_message_id(
        &mut self,
        message_id: impl Into<String>,
    ) -> Result<(), SetMessageIdError> {
        let message_id = message_id.into();

        if message_id.is_empty() {
            return Err(SetMessageIdError::Empty);
        }

        if message_id.len() > MAX_MESSAGE_ID_LENGTH {
            return Err(SetMessageIdError::MaxLengthExceeded {
                actual: message_id.len(),
                max: MAX_MESSAGE_ID_LENGTH,
            });
        }

        self.message_id = Some(message_id);
        Ok(())
    }

    /// The correlation id of the event, if any
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// Sets or clears the correlation id
    pub fn set_correlation_id(&mut self, id: impl Into<Option<String>>) {
        self.correlation_id = id.into();
    }

    /// The MIME type of the body, if any
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Sets or clears the content type
    pub fn set_content_type(&mut self, content_type: impl Into<Option<String>>) {
        self.content_type = content_type.into();
    }
}

impl From<&str> for EventData {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for EventData {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for EventData {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl From<&[u8]> for EventData {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

/// Generates `count` demonstration events with the bodies `Event1` through `Event{count}`.
pub fn synthetic_events(count: usize) -> impl Iterator<Item = EventData> {
    (1..=count).map(|i| EventData::from(format!("Event{}", i)))
}
