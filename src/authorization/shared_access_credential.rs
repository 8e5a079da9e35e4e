use time::OffsetDateTime;

use super::shared_access_signature::{SasError, SharedAccessSignature};

/// Credential presented to the Event Hubs service: either a shared access key that signs
/// a fresh signature for each resource, or a pre-computed signature.
#[derive(Clone)]
pub enum SharedAccessCredential {
    /// A named shared access key, eg. `RootManageSharedAccessKey`
    Key {
        /// Name of the shared access policy
        key_name: String,
        /// Value of the shared access key
        key: String,
    },

    /// A signature generated elsewhere
    Signature(SharedAccessSignature),
}

impl std::fmt::Debug for SharedAccessCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key { key_name, .. } => f
                .debug_struct("Key")
                .field("key_name", key_name)
                .finish_non_exhaustive(),
            Self::Signature(signature) => f.debug_tuple("Signature").field(signature).finish(),
        }
    }
}

impl From<SharedAccessSignature> for SharedAccessCredential {
    fn from(signature: SharedAccessSignature) -> Self {
        Self::Signature(signature)
    }
}

impl SharedAccessCredential {
    /// Creates a key-based credential
    pub fn from_key(key_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Key {
            key_name: key_name.into(),
            key: key.into(),
        }
    }

    /// Returns a signature that authorizes `resource`.
    pub fn signature_for(&self, resource: &str) -> Result<SharedAccessSignature, SasError> {
        match self {
            Self::Key { key_name, key } => {
                SharedAccessSignature::try_from_parts(resource, key_name, key, None)
            }
            Self::Signature(signature) => {
                if signature.expiration() <= OffsetDateTime::now_utc() {
                    log::warn!(
                        "Shared access signature for {} expired at {}",
                        signature.resource(),
                        signature.expiration()
                    );
                }
                Ok(signature.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_credential_signs_requested_resource() {
        let credential = SharedAccessCredential::from_key("name", "key");
        let signature = credential
            .signature_for("amqps://ns.servicebus.windows.net/hub")
            .unwrap();
        assert_eq!(signature.resource(), "amqps://ns.servicebus.windows.net/hub");
        assert!(signature.can_renew());
    }

    #[test]
    fn signature_credential_returns_its_signature() {
        let signature =
            SharedAccessSignature::try_from_parts("amqps://ns/hub", "name", "key", None).unwrap();
        let credential = SharedAccessCredential::from(signature.clone());
        assert_eq!(credential.signature_for("ignored").unwrap(), signature);
    }

    #[test]
    fn debug_output_does_not_contain_key() {
        let credential = SharedAccessCredential::from_key("name", "super-secret");
        assert!(!format!("{:?}", credential).contains("super-secret"));
    }
}
