//! Configuration of the publisher binary, read from environment variables.

use std::{num::ParseIntError, time::Duration};

use crate::{
    constants::DEFAULT_EVENT_COUNT, event_data_batch::CreateBatchOptions,
    event_hubs_connection_option::ConnectionOptions,
};

pub const CONNECTION_STRING_VAR: &str = "EVENT_HUBS_CONNECTION_STRING";
pub const EVENT_HUB_NAME_VAR: &str = "EVENT_HUB_NAME";
pub const EVENT_COUNT_VAR: &str = "EVENT_COUNT";
pub const MAX_BATCH_SIZE_VAR: &str = "EVENT_HUBS_MAX_BATCH_SIZE";
pub const IDLE_TIMEOUT_SECS_VAR: &str = "EVENT_HUBS_IDLE_TIMEOUT_SECS";

/// Error reading [`PublisherConfig`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("The environment variable {0} must be set")]
    MissingVariable(&'static str),

    /// A numeric variable could not be parsed
    #[error("The environment variable {name} has an invalid value '{value}'")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Everything the publisher needs to know before connecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    pub connection_string: String,
    pub event_hub_name: Option<String>,
    pub event_count: usize,
    pub batch_options: CreateBatchOptions,
    pub connection_options: ConnectionOptions,
}

impl PublisherConfig {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let connection_string = lookup(CONNECTION_STRING_VAR)
            .ok_or(ConfigError::MissingVariable(CONNECTION_STRING_VAR))?;
        let event_hub_name = lookup(EVENT_HUB_NAME_VAR);

        let event_count = parse_number::<usize>(EVENT_COUNT_VAR, lookup(EVENT_COUNT_VAR))?
            .unwrap_or(DEFAULT_EVENT_COUNT);

        let mut batch_options = CreateBatchOptions::default();
        batch_options.max_size_in_bytes =
            parse_number::<u64>(MAX_BATCH_SIZE_VAR, lookup(MAX_BATCH_SIZE_VAR))?;

        let mut connection_options = ConnectionOptions::default();
        if let Some(secs) =
            parse_number::<u64>(IDLE_TIMEOUT_SECS_VAR, lookup(IDLE_TIMEOUT_SECS_VAR))?
        {
            connection_options.connection_idle_timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            connection_string,
            event_hub_name,
            event_count,
            batch_options,
            connection_options,
        })
    }
}

fn parse_number<T>(name: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    value
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|source| ConfigError::InvalidNumber {
                    name,
                    value,
                    source,
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_are_applied() {
        let config = PublisherConfig::from_lookup(lookup_from(&[(
            CONNECTION_STRING_VAR,
            "Endpoint=sb://a/",
        )]))
        .unwrap();

        assert_eq!(config.connection_string, "Endpoint=sb://a/");
        assert_eq!(config.event_hub_name, None);
        assert_eq!(config.event_count, DEFAULT_EVENT_COUNT);
        assert_eq!(config.batch_options, CreateBatchOptions::default());
        assert_eq!(config.connection_options, ConnectionOptions::default());
    }

    #[test]
    fn all_variables_are_read() {
        let config = PublisherConfig::from_lookup(lookup_from(&[
            (CONNECTION_STRING_VAR, "cs"),
            (EVENT_HUB_NAME_VAR, "hub"),
            (EVENT_COUNT_VAR, " 50 "),
            (MAX_BATCH_SIZE_VAR, "1024"),
            (IDLE_TIMEOUT_SECS_VAR, "5"),
        ]))
        .unwrap();

        assert_eq!(config.event_hub_name.as_deref(), Some("hub"));
        assert_eq!(config.event_count, 50);
        assert_eq!(config.batch_options.max_size_in_bytes, Some(1024));
        assert_eq!(
            config.connection_options.connection_idle_timeout,
            Duration::from_secs(5)
        );
    }

    #[test]
    fn missing_connection_string_is_an_error() {
        assert_eq!(
            PublisherConfig::from_lookup(lookup_from(&[(CONNECTION_STRING_VAR, " ")])),
            Err(ConfigError::MissingVariable(CONNECTION_STRING_VAR))
        );
    }

    #[test]
    fn invalid_event_count_is_an_error() {
        let result = PublisherConfig::from_lookup(lookup_from(&[
            (CONNECTION_STRING_VAR, "cs"),
            (EVENT_COUNT_VAR, "many"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidNumber {
                name: EVENT_COUNT_VAR,
                ..
            })
        ));
    }
}
