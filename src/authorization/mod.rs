//! Types related to auth.
//!

pub use shared_access_credential::SharedAccessCredential;
pub use shared_access_signature::{SasError, SharedAccessSignature};

mod shared_access_credential;
mod shared_access_signature;

/// Builds the resource a signature is scoped to: `amqps://{namespace}/{event_hub}`, lower-cased.
pub fn build_audience_resource(fully_qualified_namespace: &str, event_hub_name: &str) -> String {
    format!(
        "{}://{}/{}",
        crate::constants::AMQPS_SCHEME,
        fully_qualified_namespace.trim_end_matches('/'),
        event_hub_name.trim_matches('/')
    )
    .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::build_audience_resource;

    #[test]
    fn audience_resource_is_lowercase_amqps_uri() {
        assert_eq!(
            build_audience_resource("Project.ServiceBus.Windows.net", "/Hub/"),
            "amqps://project.servicebus.windows.net/hub"
        );
    }
}
