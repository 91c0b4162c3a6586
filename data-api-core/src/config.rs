//! # Client Configuration
//!
//! Callers describe the object they want to access with a [`ClientConfig`]. It mirrors the
//! loosely typed configuration object accepted by the services' other clients, so every field
//! is optional and it can be deserialized straight from JSON:
//!
//! ```json
//! { "ref": "1779/1054/1", "url": "https://ci.example.org/services/taxon", "token": null, "timeout": 10000 }
//! ```
//!
//! [`validate`] checks the shape once, at client construction time, and returns an immutable
//! [`ValidatedConfig`]. Empty strings count as missing and a zero timeout counts as absent.
//! The token is optional: clients may talk to the services unauthenticated.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Timeout applied to every remote call when the configuration does not provide one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Longest timeout a call may use. Larger timeouts are clamped to it.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// An opaque reference to a stored object (e.g. `1779/1054/1`).
///
/// Values decoded from a service answer are checked the same way as [`ObjectRef::new`]: an empty
/// reference fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectRef(String);

impl ObjectRef {
    /// Creates a new reference, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() { None } else { Some(Self(v)) }
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Returned when decoding an empty object reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Object reference is empty")]
pub struct EmptyObjectRef;

impl TryFrom<String> for ObjectRef {
    type Error = EmptyObjectRef;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(EmptyObjectRef)
    }
}

impl From<ObjectRef> for String {
    fn from(object_ref: ObjectRef) -> Self {
        object_ref.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The configuration supplied by a caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Reference of the object the client is bound to.
    #[serde(rename = "ref", default)]
    pub object_ref: Option<String>,
    /// Url of the data service endpoint.
    #[serde(default)]
    pub url: Option<String>,
    /// Authorization token forwarded with every call.
    #[serde(default)]
    pub token: Option<String>,
    /// Per call timeout, in milliseconds.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_ref(mut self, object_ref: impl Into<String>) -> Self {
        self.object_ref = Some(object_ref.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn timeout_ms(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Parses a configuration from JSON.
    ///
    /// A JSON `null` is reported as [`ConfigError::ConfigurationObjectMissing`], the same way a
    /// missing configuration is.
    pub fn from_json(json: &str) -> Result<ValidatedConfig, ConfigError> {
        validate(Self::parse_json(json)?)
    }

    /// Parses a raw configuration without validating it.
    ///
    /// JSON `null` parses to `None`. Anything that is not a configuration object is
    /// [`ConfigError::Malformed`].
    pub fn parse_json(json: &str) -> Result<Option<ClientConfig>, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Validates this configuration. See [`validate`].
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        validate(Some(self))
    }
}

/// A configuration that passed validation.
///
/// It is immutable: clients share it behind an `Arc` between all their calls.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    object_ref: ObjectRef,
    url: String,
    token: Option<String>,
    timeout: Duration,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("object_ref", &self.object_ref)
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ValidatedConfig {
    pub fn object_ref(&self) -> &ObjectRef {
        &self.object_ref
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Validates a client configuration.
///
/// # Returns
///
/// * `Ok(ValidatedConfig)` - The configuration, with the timeout defaulted to [`DEFAULT_TIMEOUT`]
///   when it was absent or zero, and clamped to [`MAX_TIMEOUT`]
///   when it was absent or zero.
/// * `Err(ConfigError)` - If the configuration, the object reference or the url is missing.
pub fn validate(config: Option<ClientConfig>) -> Result<ValidatedConfig, ConfigError> {
    let config = config.ok_or(ConfigError::ConfigurationObjectMissing)?;

    let object_ref = config
        .object_ref
        .and_then(ObjectRef::new)
        .ok_or(ConfigError::ObjectReferenceMissing)?;

    let url = config
        .url
        .filter(|url| !url.is_empty())
        .ok_or(ConfigError::UrlMissing)?;

    let timeout = match config.timeout {
        Some(ms) if ms > 0 => Duration::from_millis(ms).min(MAX_TIMEOUT),
        _ => DEFAULT_TIMEOUT,
    };

    Ok(ValidatedConfig {
        object_ref,
        url,
        token: config.token.filter(|token| !token.is_empty()),
        timeout,
    })
}
