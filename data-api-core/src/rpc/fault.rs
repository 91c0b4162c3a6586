//! # Fault Wire Format
//!
//! A data service reports a fault by answering with a `tonic::Status` whose `details` carry a
//! JSON document naming the fault kind:
//!
//! ```json
//! { "kind": "ServiceException", "message": "backend down" }
//! ```
//!
//! The status code follows [`FaultKind::code`] so that generic tooling still sees a sensible
//! code, but the client only trusts the details. A status without a recognised fault in its
//! details is mapped by code for the two authentication related codes and otherwise surfaces
//! as a [`ClientError::Transport`] failure with the original status.
use crate::error::{ClientError, FaultKind, RemoteFault};
use serde::{Deserialize, Serialize};
use tonic::{Code, Status, codegen::Bytes};

#[derive(Debug, Serialize, Deserialize)]
struct WireFault {
    kind: String,
    #[serde(flatten)]
    fault: RemoteFault,
}

/// Encodes a fault into the status a service answers with.
pub fn status_from_fault(kind: FaultKind, fault: &RemoteFault) -> Status {
    let wire = WireFault {
        kind: kind.name().to_string(),
        fault: fault.clone(),
    };

    // Serializing a struct of strings cannot fail.
    let details = serde_json::to_vec(&wire).unwrap_or_default();

    Status::with_details(kind.code(), fault.message.clone(), Bytes::from(details))
}

/// Decodes the status returned by a failed call into a [`ClientError`].
pub fn fault_from_status(status: Status) -> ClientError {
    if let Some((kind, fault)) = decode_details(status.details()) {
        return ClientError::Remote { kind, fault };
    }

    let kind = match status.code() {
        Code::Unauthenticated => FaultKind::Authentication,
        Code::PermissionDenied => FaultKind::Authorization,
        _ => return ClientError::Transport(status),
    };

    ClientError::Remote {
        kind,
        fault: RemoteFault::new(status.message()),
    }
}

fn decode_details(details: &[u8]) -> Option<(FaultKind, RemoteFault)> {
    if details.is_empty() {
        return None;
    }

    let wire: WireFault = serde_json::from_slice(details).ok()?;
    let kind = FaultKind::from_name(&wire.kind)?;

    Some((kind, wire.fault))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_kind_and_payload() {
        let fault = RemoteFault {
            message: "wrong type".to_string(),
            stacktrace: Some("at get_stats".to_string()),
            valid_types: vec!["KBaseGenomeAnnotations.Assembly".to_string()],
        };

        let status = status_from_fault(FaultKind::Type, &fault);
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "wrong type");

        match fault_from_status(status) {
            ClientError::Remote { kind, fault: decoded } => {
                assert_eq!(kind, FaultKind::Type);
                assert_eq!(decoded, fault);
            }
            other => panic!("Expected a remote fault, got {other:?}"),
        }
    }

    #[test]
    fn every_kind_survives_the_wire() {
        for (_, kind) in crate::error::FAULT_KINDS {
            let status = status_from_fault(kind, &RemoteFault::new("boom"));
            assert_eq!(fault_from_status(status).fault_kind(), Some(kind));
        }
    }

    #[test]
    fn auth_codes_without_details() {
        let err = fault_from_status(Status::unauthenticated("no token"));
        assert_eq!(err.fault_kind(), Some(FaultKind::Authentication));
        assert_eq!(err.fault().unwrap().message, "no token");

        let err = fault_from_status(Status::permission_denied("private"));
        assert_eq!(err.fault_kind(), Some(FaultKind::Authorization));
    }

    #[test]
    fn plain_statuses_are_transport_failures() {
        let err = fault_from_status(Status::unavailable("connection refused"));
        assert!(matches!(err, ClientError::Transport(status) if status.code() == Code::Unavailable));

        // A NOT_FOUND without fault details is not an object reference fault.
        let err = fault_from_status(Status::not_found("no route"));
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn unknown_fault_names_are_transport_failures() {
        let details = Bytes::from_static(br#"{ "kind": "TException", "message": "?" }"#);
        let status = Status::with_details(Code::Internal, "?", details);

        assert!(matches!(fault_from_status(status), ClientError::Transport(_)));
    }
}
