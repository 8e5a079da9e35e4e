use fe2o3_amqp_types::{
    messaging::{message::__private::Serializable, Batch, Data, Message},
    primitives::Binary,
};

use crate::event_data::EventData;

use super::amqp_message_extension::AmqpMessageMutExt;

/// Descriptor of a `Data` section: `0x00` followed by the smallulong `0x53 0x75`.
const DATA_SECTION_DESCRIPTOR_SIZE: u64 = 3;
/// `vbin8`: constructor plus one length byte. Only used for lengths below 255.
const VBIN8_HEADER_SIZE: u64 = 2;
/// `vbin32`: constructor plus four length bytes.
const VBIN32_HEADER_SIZE: u64 = 5;

pub(crate) fn build_amqp_message_from_event(event: &EventData) -> Message<Data> {
    let mut message = Message {
        header: None,
        delivery_annotations: None,
        message_annotations: None,
        properties: None,
        application_properties: None,
        body: Data(Binary::from(event.body().to_vec())),
        footer: None,
    };
    message.set_message_id(event.message_id().map(String::from));
    message.set_correlation_id(event.correlation_id().map(String::from));
    message.set_content_type(event.content_type().map(String::from));
    message
}

/// Encodes the event as a complete AMQP message, the form it takes inside a batch envelope.
pub(crate) fn encode_event(event: &EventData) -> Result<Vec<u8>, serde_amqp::Error> {
    let message = build_amqp_message_from_event(event);
    serde_amqp::to_vec(&Serializable(message))
}

/// Size of a `Data` section wrapping `payload_len` bytes.
pub(crate) fn data_section_size(payload_len: usize) -> u64 {
    let payload_len = payload_len as u64;
    let header = if payload_len < u8::MAX as u64 {
        VBIN8_HEADER_SIZE
    } else {
        VBIN32_HEADER_SIZE
    };
    DATA_SECTION_DESCRIPTOR_SIZE + header + payload_len
}

/// Wraps the encoded events as the `Data` sections of a single envelope message.
pub(crate) fn build_batch_envelope(encoded_events: Vec<Vec<u8>>) -> Message<Batch<Data>> {
    let sections: Vec<Data> = encoded_events
        .into_iter()
        .map(|bytes| Data(Binary::from(bytes)))
        .collect();
    Message {
        header: None,
        delivery_annotations: None,
        message_annotations: None,
        properties: None,
        application_properties: None,
        body: Batch::new(sections),
        footer: None,
    }
}
