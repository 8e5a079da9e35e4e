use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use time::OffsetDateTime;

use crate::constants::{DEFAULT_SAS_TOKEN_VALIDITY, MAXIMUM_KEY_LENGTH, MAXIMUM_KEY_NAME_LENGTH};

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PREFIX: &str = "SharedAccessSignature";
const SIGNED_RESOURCE_TOKEN: &str = "sr";
const SIGNATURE_TOKEN: &str = "sig";
const SIGNED_EXPIRY_TOKEN: &str = "se";
const SIGNED_KEY_NAME_TOKEN: &str = "skn";

/// Error creating or parsing a [`SharedAccessSignature`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SasError {
    /// The key name is empty or too long
    #[error("The shared access key name must be between 1 and {} characters", MAXIMUM_KEY_NAME_LENGTH)]
    InvalidKeyName,

    /// The key is empty or too long
    #[error("The shared access key must be between 1 and {} characters", MAXIMUM_KEY_LENGTH)]
    InvalidKey,

    /// The signed resource is empty
    #[error("The signed resource cannot be empty")]
    EmptyResource,

    /// The key cannot be used with HMAC-SHA256
    #[error("The shared access key cannot be used for signing")]
    InvalidSigningKey,

    /// The signature string is not a shared access signature
    #[error("The value is not a valid shared access signature")]
    InvalidSignature,
}

/// A shared access signature used to authorize access to an Event Hub.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedAccessSignature {
    resource: String,
    shared_access_key_name: Option<String>,
    shared_access_key: Option<String>,
    expiration: OffsetDateTime,
    value: String,
}

impl std::fmt::Debug for SharedAccessSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedAccessSignature")
            .field("resource", &self.resource)
            .field("shared_access_key_name", &self.shared_access_key_name)
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

impl SharedAccessSignature {
    /// Creates a signature for `resource` from a shared access key, valid for `validity`
    /// (one hour if `None`).
    pub fn try_from_parts(
        resource: impl Into<String>,
        shared_access_key_name: impl Into<String>,
        shared_access_key: impl Into<String>,
        validity: Option<Duration>,
    ) -> Result<Self, SasError> {
        let resource = resource.into();
        let shared_access_key_name = shared_access_key_name.into();
        let shared_access_key = shared_access_key.into();

        if resource.is_empty() {
            return Err(SasError::EmptyResource);
        }
        if shared_access_key_name.is_empty()
            || shared_access_key_name.len() > MAXIMUM_KEY_NAME_LENGTH
        {
            return Err(SasError::InvalidKeyName);
        }
        if shared_access_key.is_empty() || shared_access_key.len() > MAXIMUM_KEY_LENGTH {
            return Err(SasError::InvalidKey);
        }

        let expiration =
            OffsetDateTime::now_utc() + validity.unwrap_or(DEFAULT_SAS_TOKEN_VALIDITY);
        let value = build_signature(
            &resource,
            &shared_access_key_name,
            &shared_access_key,
            expiration,
        )?;

        Ok(Self {
            resource,
            shared_access_key_name: Some(shared_access_key_name),
            shared_access_key: Some(shared_access_key),
            expiration,
            value,
        })
    }

    /// Wraps a pre-computed signature, reading its signed resource and expiry.
    pub fn try_from_signature(signature: impl Into<String>) -> Result<Self, SasError> {
        let value = signature.into();
        let fields = value
            .strip_prefix(SIGNATURE_PREFIX)
            .ok_or(SasError::InvalidSignature)?
            .trim_start();

        let mut resource = None;
        let mut expiry = None;
        let mut key_name = None;
        for pair in fields.split('&') {
            let (token, field) = pair.split_once('=').ok_or(SasError::InvalidSignature)?;
            let field = urlencoding::decode(field).map_err(|_| SasError::InvalidSignature)?;
            match token {
                SIGNED_RESOURCE_TOKEN => resource = Some(field.into_owned()),
                SIGNED_EXPIRY_TOKEN => expiry = Some(field.into_owned()),
                SIGNED_KEY_NAME_TOKEN => key_name = Some(field.into_owned()),
                _ => {}
            }
        }

        let resource = resource
            .filter(|r| !r.is_empty())
            .ok_or(SasError::InvalidSignature)?;
        let expiration = expiry
            .and_then(|se| se.parse::<i64>().ok())
            .and_then(|se| OffsetDateTime::from_unix_timestamp(se).ok())
            .ok_or(SasError::InvalidSignature)?;

        Ok(Self {
            resource,
            shared_access_key_name: key_name,
            shared_access_key: None,
            expiration,
            value,
        })
    }

    /// The resource the signature grants access to
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The name of the key used to sign, if known
    pub fn shared_access_key_name(&self) -> Option<&str> {
        self.shared_access_key_name.as_deref()
    }

    /// When the signature stops being valid
    pub fn expiration(&self) -> OffsetDateTime {
        self.expiration
    }

    /// The `SharedAccessSignature sr=...` string presented to the service
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the signature can be regenerated after it expires
    pub fn can_renew(&self) -> bool {
        self.shared_access_key.is_some()
    }
}

fn build_signature(
    resource: &str,
    key_name: &str,
    key: &str,
    expiration: OffsetDateTime,
) -> Result<String, SasError> {
    let encoded_resource = urlencoding::encode(resource);
    let expiry = expiration.unix_timestamp();
    let string_to_sign = format!("{}\n{}", encoded_resource, expiry);

    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).map_err(|_| SasError::InvalidSigningKey)?;
    mac.update(string_to_sign.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    Ok(format!(
        "{} {}={}&{}={}&{}={}&{}={}",
        SIGNATURE_PREFIX,
        SIGNED_RESOURCE_TOKEN,
        encoded_resource,
        SIGNATURE_TOKEN,
        urlencoding::encode(&signature),
        SIGNED_EXPIRY_TOKEN,
        expiry,
        SIGNED_KEY_NAME_TOKEN,
        urlencoding::encode(key_name),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOURCE: &str = "amqps://ns.servicebus.windows.net/hub";

    #[test]
    fn try_from_parts_produces_verifiable_signature() {
        let sas = SharedAccessSignature::try_from_parts(
            RESOURCE,
            "keyName",
            "key",
            Some(Duration::from_secs(4 * 60 * 60)),
        )
        .unwrap();

        let expiry = sas.expiration().unix_timestamp();
        let encoded_resource = urlencoding::encode(RESOURCE);
        let mut mac = HmacSha256::new_from_slice(b"key").unwrap();
        mac.update(format!("{}\n{}", encoded_resource, expiry).as_bytes());
        let expected_sig = urlencoding::encode(&STANDARD.encode(mac.finalize().into_bytes()))
            .into_owned();

        let expected = format!(
            "SharedAccessSignature sr={}&sig={}&se={}&skn=keyName",
            encoded_resource, expected_sig, expiry
        );
        assert_eq!(sas.value(), expected);
        assert!(sas.can_renew());
    }

    #[test]
    fn try_from_parts_defaults_to_one_hour() {
        let before = OffsetDateTime::now_utc();
        let sas = SharedAccessSignature::try_from_parts(RESOURCE, "name", "key", None).unwrap();
        let validity = sas.expiration() - before;
        assert!(validity >= time::Duration::hours(1));
        assert!(validity < time::Duration::minutes(61));
    }

    #[test]
    fn try_from_parts_validates_inputs() {
        assert_eq!(
            SharedAccessSignature::try_from_parts("", "name", "key", None),
            Err(SasError::EmptyResource)
        );
        assert_eq!(
            SharedAccessSignature::try_from_parts(RESOURCE, "", "key", None),
            Err(SasError::InvalidKeyName)
        );
        assert_eq!(
            SharedAccessSignature::try_from_parts(
                RESOURCE,
                "n".repeat(MAXIMUM_KEY_NAME_LENGTH + 1),
                "key",
                None
            ),
            Err(SasError::InvalidKeyName)
        );
        assert_eq!(
            SharedAccessSignature::try_from_parts(RESOURCE, "name", "", None),
            Err(SasError::InvalidKey)
        );
    }

    #[test]
    fn try_from_signature_reads_generated_signature() {
        let generated =
            SharedAccessSignature::try_from_parts(RESOURCE, "keyName", "key", None).unwrap();

        let parsed = SharedAccessSignature::try_from_signature(generated.value()).unwrap();

        assert_eq!(parsed.resource(), RESOURCE);
        assert_eq!(parsed.shared_access_key_name(), Some("keyName"));
        assert_eq!(
            parsed.expiration().unix_timestamp(),
            generated.expiration().unix_timestamp()
        );
        assert!(!parsed.can_renew());
    }

    #[test]
    fn try_from_signature_rejects_other_values() {
        assert_eq!(
            SharedAccessSignature::try_from_signature("Bearer abc"),
            Err(SasError::InvalidSignature)
        );
        assert_eq!(
            SharedAccessSignature::try_from_signature("SharedAccessSignature sr=a&sig=b"),
            Err(SasError::InvalidSignature)
        );
    }

    #[test]
    fn debug_output_does_not_contain_key() {
        let sas =
            SharedAccessSignature::try_from_parts(RESOURCE, "name", "super-secret", None).unwrap();
        assert!(!format!("{:?}", sas).contains("super-secret"));
    }
}
