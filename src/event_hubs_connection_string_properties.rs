use url::Url;

const ENDPOINT_SCHEME: &str = "sb";
const ENDPOINT_TOKEN: &str = "Endpoint";
const EVENT_HUB_NAME_TOKEN: &str = "EntityPath";
const SHARED_ACCESS_KEY_NAME_TOKEN: &str = "SharedAccessKeyName";
const SHARED_ACCESS_KEY_VALUE_TOKEN: &str = "SharedAccessKey";
const SHARED_ACCESS_SIGNATURE_TOKEN: &str = "SharedAccessSignature";
const TOKEN_VALUE_SEPARATOR: char = '=';
const TOKEN_VALUE_PAIR_DELIMITER: char = ';';

/// Error parsing or validating a connection string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionStringError {
    /// The connection string is empty
    #[error("The connection string cannot be empty")]
    Empty,

    /// A token has no value
    #[error("The token '{0}' has no value")]
    MissingValue(String),

    /// The endpoint is not an absolute `sb://` URI with a host
    #[error("The endpoint '{0}' is not a valid Event Hubs endpoint")]
    InvalidEndpoint(String),

    /// No endpoint was found
    #[error("The connection string does not contain an endpoint")]
    MissingEndpoint,

    /// Neither a shared key nor a shared access signature was found
    #[error("The connection string must contain either a shared key name and key or a shared access signature")]
    MissingCredential,

    /// Both a shared key and a shared access signature were found
    #[error("The connection string cannot contain both a shared key and a shared access signature")]
    ConflictingCredentials,

    /// The entity path does not match the event hub name given separately
    #[error("The event hub name '{given}' does not match the entity path '{entity_path}'")]
    EventHubNameMismatch {
        /// Name passed by the caller
        given: String,
        /// `EntityPath` of the connection string
        entity_path: String,
    },

    /// No event hub name was given and the connection string has no entity path
    #[error("The event hub name must be given when the connection string has no entity path")]
    MissingEventHubName,
}

/// The set of properties that comprise an Event Hubs connection string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventHubsConnectionStringProperties {
    endpoint: Option<Url>,
    event_hub_name: Option<String>,
    shared_access_key_name: Option<String>,
    shared_access_key: Option<String>,
    shared_access_signature: Option<String>,
}

impl EventHubsConnectionStringProperties {
    /// The endpoint to be used for connecting to the Event Hubs namespace
    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }

    /// The host of the endpoint, i.e. the fully qualified namespace
    pub fn fully_qualified_namespace(&self) -> Option<&str> {
        self.endpoint.as_ref().and_then(|url| url.host_str())
    }

    /// The name of the Event Hub instance (`EntityPath`)
    pub fn event_hub_name(&self) -> Option<&str> {
        self.event_hub_name.as_deref()
    }

    /// The name of the shared access key
    pub fn shared_access_key_name(&self) -> Option<&str> {
        self.shared_access_key_name.as_deref()
    }

    /// The value of the shared access key
    pub fn shared_access_key(&self) -> Option<&str> {
        self.shared_access_key.as_deref()
    }

    /// A pre-computed shared access signature
    pub fn shared_access_signature(&self) -> Option<&str> {
        self.shared_access_signature.as_deref()
    }

    /// Parses a connection string into its properties.
    ///
    /// Keys are matched case-insensitively, unknown keys are ignored and values may contain
    /// `=`. This does not validate the result, see [`Self::validate`].
    pub fn parse(connection_string: &str) -> Result<Self, ConnectionStringError> {
        if connection_string.trim().is_empty() {
            return Err(ConnectionStringError::Empty);
        }

        let mut properties = Self::default();

        for pair in connection_string
            .split(TOKEN_VALUE_PAIR_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let (token, value) = match pair.split_once(TOKEN_VALUE_SEPARATOR) {
                Some((token, value)) => (token.trim(), value.trim()),
                None => (pair, ""),
            };

            if value.is_empty() {
                return Err(ConnectionStringError::MissingValue(token.to_string()));
            }

            if token.eq_ignore_ascii_case(ENDPOINT_TOKEN) {
                let endpoint = Url::parse(value)
                    .map_err(|_| ConnectionStringError::InvalidEndpoint(value.to_string()))?;
                properties.endpoint = Some(endpoint);
            } else if token.eq_ignore_ascii_case(EVENT_HUB_NAME_TOKEN) {
                properties.event_hub_name = Some(value.to_string());
            } else if token.eq_ignore_ascii_case(SHARED_ACCESS_KEY_NAME_TOKEN) {
                properties.shared_access_key_name = Some(value.to_string());
            } else if token.eq_ignore_ascii_case(SHARED_ACCESS_KEY_VALUE_TOKEN) {
                properties.shared_access_key = Some(value.to_string());
            } else if token.eq_ignore_ascii_case(SHARED_ACCESS_SIGNATURE_TOKEN) {
                properties.shared_access_signature = Some(value.to_string());
            } else {
                log::debug!("Ignoring unknown connection string token '{}'", token);
            }
        }

        Ok(properties)
    }

    /// Checks that the properties are sufficient to connect to `event_hub_name` and returns the
    /// name of the Event Hub to use.
    pub fn validate(&self, event_hub_name: Option<&str>) -> Result<String, ConnectionStringError> {
        let endpoint = self
            .endpoint
            .as_ref()
            .ok_or(ConnectionStringError::MissingEndpoint)?;
        if endpoint.scheme() != ENDPOINT_SCHEME || endpoint.host_str().is_none() {
            return Err(ConnectionStringError::InvalidEndpoint(endpoint.to_string()));
        }

        let has_shared_key =
            self.shared_access_key_name.is_some() && self.shared_access_key.is_some();
        let has_partial_shared_key =
            self.shared_access_key_name.is_some() != self.shared_access_key.is_some();
        match (has_shared_key, self.shared_access_signature.is_some()) {
            (true, true) => return Err(ConnectionStringError::ConflictingCredentials),
            (false, false) => return Err(ConnectionStringError::MissingCredential),
            _ if has_partial_shared_key => return Err(ConnectionStringError::MissingCredential),
            _ => {}
        }

        match (event_hub_name, self.event_hub_name.as_deref()) {
            (Some(given), Some(entity_path)) if given != entity_path => {
                Err(ConnectionStringError::EventHubNameMismatch {
                    given: given.to_string(),
                    entity_path: entity_path.to_string(),
                })
            }
            (Some(name), _) | (None, Some(name)) => Ok(name.to_string()),
            (None, None) => Err(ConnectionStringError::MissingEventHubName),
        }
    }
}
