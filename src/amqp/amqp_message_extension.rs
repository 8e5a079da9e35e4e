use fe2o3_amqp_types::{
    messaging::{Message, MessageId, Properties},
    primitives::Symbol,
};
#[cfg(test)]
use std::borrow::Cow;

#[cfg(test)]
pub(crate) trait AmqpMessageExt {
    fn message_id(&self) -> Option<Cow<'_, str>>;

    fn correlation_id(&self) -> Option<Cow<'_, str>>;

    fn content_type(&self) -> Option<&str>;
}

/// Setters for the `properties` section. Values are validated on [`crate::EventData`]
/// before they get here.
pub(crate) trait AmqpMessageMutExt {
    fn set_message_id(&mut self, message_id: Option<String>);

    fn set_correlation_id(&mut self, id: Option<String>);

    fn set_content_type(&mut self, content_type: Option<String>);
}

#[cfg(test)]
fn message_id_as_str(id: &MessageId) -> Cow<'_, str> {
    match id {
        MessageId::String(val) => Cow::Borrowed(val),
        MessageId::Ulong(val) => Cow::Owned(val.to_string()),
        MessageId::Uuid(uuid) => Cow::Owned(format!("{:x}", uuid)),
        MessageId::Binary(bytes) => {
            let binary_ref = fe2o3_amqp_types::primitives::BinaryRef::from(bytes);
            Cow::Owned(format!("{:X}", binary_ref))
        }
    }
}

#[cfg(test)]
impl<B> AmqpMessageExt for Message<B> {
    #[inline]
    fn message_id(&self) -> Option<Cow<'_, str>> {
        self.properties
            .as_ref()?
            .message_id
            .as_ref()
            .map(message_id_as_str)
    }

    #[inline]
    fn correlation_id(&self) -> Option<Cow<'_, str>> {
        self.properties
            .as_ref()?
            .correlation_id
            .as_ref()
            .map(message_id_as_str)
    }

    #[inline]
    fn content_type(&self) -> Option<&str> {
        self.properties
            .as_ref()?
            .content_type
            .as_ref()
            .map(|s| s.as_str())
    }
}

impl<B> AmqpMessageMutExt for Message<B> {
    #[inline]
    fn set_message_id(&mut self, message_id: Option<String>) {
        if let Some(message_id) = message_id {
            self.properties
                .get_or_insert(Properties::default())
                .message_id = Some(MessageId::String(message_id));
        }
    }

    #[inline]
    fn set_correlation_id(&mut self, id: Option<String>) {
        if let Some(id) = id {
            self.properties
                .get_or_insert(Properties::default())
                .correlation_id = Some(MessageId::String(id));
        }
    }

    #[inline]
    fn set_content_type(&mut self, content_type: Option<String>) {
        if let Some(content_type) = content_type {
            self.properties
                .get_or_insert(Properties::default())
                .content_type = Some(Symbol::from(content_type));
        }
    }
}
