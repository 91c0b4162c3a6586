//! # Error Taxonomy
//!
//! All the failures a data client can report are variants of [`ClientError`]:
//!
//! * **Configuration** errors are raised synchronously when a client is constructed.
//! * **Transport construction** errors are raised while building the transport, protocol and
//!   stub of a call.
//! * **Remote** faults are reported by the service itself. Their [`FaultKind`] is preserved
//!   from the wire, so callers can tell an authorization failure from a service fault.
//! * **Transport** failures cover everything that goes wrong on the way to the service or back
//!   (connection refused, timeouts, statuses without a typed fault).
//!
//! Fault kinds are resolved by name through the static [`FAULT_KINDS`] table.
use crate::BoxError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tonic::{Code, Status};

/// Errors detected while validating a [`crate::ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration object missing")]
    ConfigurationObjectMissing,
    #[error("Object reference \"ref\" missing")]
    ObjectReferenceMissing,
    #[error("Cannot find a url for the data api")]
    UrlMissing,
    #[error("Configuration could not be parsed: {0}")]
    Malformed(String),
}

impl ConfigError {
    /// Machine readable name of the error.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigError::ConfigurationObjectMissing => "ConfigurationObjectMissing",
            ConfigError::ObjectReferenceMissing => "ObjectReferenceMissing",
            ConfigError::UrlMissing => "UrlMissing",
            ConfigError::Malformed(_) => "ConfigurationMalformed",
        }
    }

    /// Human readable description of the error.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// What the caller should do about it.
    pub fn suggestion(&self) -> &'static str {
        match self {
            ConfigError::ConfigurationObjectMissing => {
                "This is an API usage error; the client factory requires a single configuration object as an argument."
            }
            ConfigError::ObjectReferenceMissing => {
                "The object reference is provided as the \"ref\" property of the configuration"
            }
            ConfigError::UrlMissing => {
                "The url is provided as the \"url\" property of the configuration"
            }
            ConfigError::Malformed(_) => {
                "The configuration must be an object with \"ref\", \"url\", \"token\" and \"timeout\" properties"
            }
        }
    }
}

/// The kinds of fault a data service may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The attribute has no meaningful value for this particular object.
    Attribute,
    /// The object is not of a type the operation supports.
    Type,
    /// The service failed while handling the call.
    Service,
    /// The caller is not allowed to access the object.
    Authorization,
    /// The caller could not be authenticated.
    Authentication,
    /// The object reference does not resolve to an object.
    ObjectReference,
}

/// Every fault kind, indexed by its wire name.
pub static FAULT_KINDS: [(&str, FaultKind); 6] = [
    ("AttributeException", FaultKind::Attribute),
    ("TypeException", FaultKind::Type),
    ("ServiceException", FaultKind::Service),
    ("AuthorizationException", FaultKind::Authorization),
    ("AuthenticationException", FaultKind::Authentication),
    ("ObjectReferenceException", FaultKind::ObjectReference),
];

impl FaultKind {
    /// Looks a fault kind up by its wire name (e.g. `ServiceException`).
    pub fn from_name(name: &str) -> Option<Self> {
        FAULT_KINDS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, kind)| *kind)
    }

    /// The wire name of this fault kind.
    pub fn name(self) -> &'static str {
        match self {
            FaultKind::Attribute => "AttributeException",
            FaultKind::Type => "TypeException",
            FaultKind::Service => "ServiceException",
            FaultKind::Authorization => "AuthorizationException",
            FaultKind::Authentication => "AuthenticationException",
            FaultKind::ObjectReference => "ObjectReferenceException",
        }
    }

    /// The status code a fault of this kind travels with.
    pub fn code(self) -> Code {
        match self {
            FaultKind::Attribute => Code::FailedPrecondition,
            FaultKind::Type => Code::InvalidArgument,
            FaultKind::Service => Code::Internal,
            FaultKind::Authorization => Code::PermissionDenied,
            FaultKind::Authentication => Code::Unauthenticated,
            FaultKind::ObjectReference => Code::NotFound,
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The payload of a fault reported by a data service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFault {
    pub message: String,
    /// Server side stack trace, when the service chose to include one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<String>,
    /// For type mismatches, the object types the operation accepts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub valid_types: Vec<String>,
}

impl RemoteFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for RemoteFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A coarse classification of [`ClientError`], handy for logging and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    TransportConstruction,
    Remote(FaultKind),
    Transport,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "ConfigurationError",
            ErrorKind::TransportConstruction => "TransportConstructionError",
            ErrorKind::Remote(kind) => kind.name(),
            ErrorKind::Transport => "TransportError",
        }
    }
}

/// Errors returned by the data clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("An error was encountered creating the rpc client objects: '{0}'")]
    TransportConstruction(#[source] BoxError),

    #[error("{kind}: {fault}")]
    Remote { kind: FaultKind, fault: RemoteFault },

    #[error("Internal error, the transport was not ready: '{0}'")]
    NotReady(#[source] BoxError),

    #[error("Transport failure: code={:?} message={:?}", .0.code(), .0.message())]
    Transport(#[source] Status),

    #[error("The call did not complete within {0:?}")]
    Timeout(Duration),
}

impl ClientError {
    /// Builds a remote fault of the given kind.
    pub fn remote(kind: FaultKind, message: impl Into<String>) -> Self {
        ClientError::Remote {
            kind,
            fault: RemoteFault::new(message),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Configuration(_) => ErrorKind::Configuration,
            ClientError::TransportConstruction(_) => ErrorKind::TransportConstruction,
            ClientError::Remote { kind, .. } => ErrorKind::Remote(*kind),
            ClientError::NotReady(_) | ClientError::Transport(_) | ClientError::Timeout(_) => {
                ErrorKind::Transport
            }
        }
    }

    /// Returns the fault kind if this error was reported by the service.
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self {
            ClientError::Remote { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns the fault payload if this error was reported by the service.
    pub fn fault(&self) -> Option<&RemoteFault> {
        match self {
            ClientError::Remote { fault, .. } => Some(fault),
            _ => None,
        }
    }

    /// What the caller should do about it.
    pub fn suggestion(&self) -> &'static str {
        match self {
            ClientError::Configuration(err) => err.suggestion(),
            ClientError::TransportConstruction(_) => {
                "This could be a configuration or runtime error. Please consult the logs for the underlying error"
            }
            ClientError::Remote { kind, .. } => match kind {
                FaultKind::Attribute => "This attribute is not supported for this object",
                FaultKind::Type => "The object is not of a type supported by this service",
                FaultKind::Service => "The service failed to process the request; try again later",
                FaultKind::Authorization => "You do not have access to this object",
                FaultKind::Authentication => "Provide a valid authorization token",
                FaultKind::ObjectReference => "Check that the object reference exists",
            },
            ClientError::NotReady(_) | ClientError::Transport(_) => {
                "Check that the service url is correct and that the service is reachable"
            }
            ClientError::Timeout(_) => "Increase the timeout or try again later",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_kinds_resolve_by_name() {
        for (name, kind) in FAULT_KINDS {
            assert_eq!(FaultKind::from_name(name), Some(kind));
            assert_eq!(kind.name(), name);
        }
        assert_eq!(FaultKind::from_name("TException"), None);
    }

    #[test]
    fn configuration_error_names() {
        assert_eq!(
            ConfigError::ConfigurationObjectMissing.name(),
            "ConfigurationObjectMissing"
        );
        assert_eq!(
            ConfigError::ObjectReferenceMissing.name(),
            "ObjectReferenceMissing"
        );
        assert_eq!(ConfigError::UrlMissing.name(), "UrlMissing");
        assert_eq!(
            ConfigError::UrlMissing.message(),
            "Cannot find a url for the data api"
        );
    }

    #[test]
    fn client_error_kinds() {
        let err = ClientError::from(ConfigError::UrlMissing);
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.fault_kind(), None);

        let err = ClientError::remote(FaultKind::Service, "backend down");
        assert_eq!(err.kind(), ErrorKind::Remote(FaultKind::Service));
        assert_eq!(err.kind().name(), "ServiceException");
        assert_eq!(err.fault().unwrap().message, "backend down");
        assert_eq!(err.to_string(), "ServiceException: backend down");

        let err = ClientError::Timeout(Duration::from_millis(10));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
