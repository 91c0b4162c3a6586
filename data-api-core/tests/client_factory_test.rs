use common::MockDataService;
use data_api_core::{
    Assembly, BoxError, ClientConfig, ClientError, ConfigError, ErrorKind, FaultKind,
    MAX_TIMEOUT, Taxon, validate,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;
use tonic::Code;

mod common;

#[test]
fn test_missing_reference_or_url_never_builds_a_client() {
    let err = Taxon::new(ClientConfig::new().url("http://svc")).unwrap_err();
    assert_eq!(err, ConfigError::ObjectReferenceMissing);

    let err = Assembly::new(ClientConfig::new().object_ref("1/2/3")).unwrap_err();
    assert_eq!(err, ConfigError::UrlMissing);
    assert_eq!(
        err.suggestion(),
        "The url is provided as the \"url\" property of the configuration"
    );

    assert_eq!(validate(None), Err(ConfigError::ConfigurationObjectMissing));
}

#[test]
fn test_validate_example() {
    let config = validate(Some(
        ClientConfig::new().object_ref("1/2/3").url("http://svc"),
    ))
    .unwrap();

    assert_eq!(config.object_ref().as_str(), "1/2/3");
    assert_eq!(config.url(), "http://svc");
    assert_eq!(config.timeout(), Duration::from_millis(30000));

    let err = validate(Some(ClientConfig::new().url("http://svc"))).unwrap_err();
    assert_eq!(err.name(), "ObjectReferenceMissing");
}

#[tokio::test]
async fn test_token_is_optional() {
    let service = MockDataService::new().value("/taxon.Taxon/get_kingdom", "Bacteria".into());
    let config = ClientConfig::new()
        .object_ref("1/2/3")
        .url("http://svc")
        .validate()
        .unwrap();

    let taxon = Taxon::with_connector(config, service.connector(Default::default()));

    assert_eq!(taxon.kingdom().await.unwrap().as_deref(), Some("Bacteria"));
    assert_eq!(service.calls()[0].envelope.token, None);
}

#[tokio::test]
async fn test_builds_a_transport_per_call() {
    let service = MockDataService::new()
        .value("/taxon.Taxon/get_kingdom", "Bacteria".into())
        .value("/taxon.Taxon/get_domain", "Eukaryota".into());
    let built = Arc::new(AtomicUsize::new(0));

    let taxon = Taxon::with_connector(common::config(), service.connector(built.clone()));

    taxon.kingdom().await.unwrap();
    taxon.domain().await.unwrap();
    taxon.kingdom().await.unwrap();

    assert_eq!(built.load(Ordering::SeqCst), 3);

    // Clones share the configuration but still build their own transports.
    let clone = taxon.clone();
    clone.domain().await.unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_construction_failures_are_wrapped() {
    let connector = |_url: &str, _timeout: Duration| -> Result<MockDataService, BoxError> {
        Err("no transport available".into())
    };

    let taxon = Taxon::with_connector(common::config(), connector);
    let err = taxon.kingdom().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportConstruction);
    let ClientError::TransportConstruction(source) = err else {
        panic!("Expected a transport construction error");
    };
    assert_eq!(source.to_string(), "no transport available");
}

#[tokio::test]
async fn test_construction_failures_are_not_wrapped_twice() {
    let connector = |_url: &str, _timeout: Duration| -> Result<MockDataService, BoxError> {
        Err(Box::new(ClientError::remote(
            FaultKind::Authentication,
            "token expired",
        )))
    };

    let taxon = Taxon::with_connector(common::config(), connector);
    let err = taxon.kingdom().await.unwrap_err();

    assert_eq!(err.fault_kind(), Some(FaultKind::Authentication));
    assert_eq!(err.fault().unwrap().message, "token expired");
}

#[tokio::test]
async fn test_invalid_url_is_a_construction_failure() {
    let taxon = Taxon::new(
        ClientConfig::new()
            .object_ref("1/2/3")
            .url("not a valid url"),
    )
    .unwrap();

    let err = taxon.kingdom().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportConstruction);
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_failure() {
    let taxon = Taxon::new(
        ClientConfig::new()
            .object_ref("1/2/3")
            .url("http://127.0.0.1:1")
            .timeout_ms(5_000),
    )
    .unwrap();

    let err = taxon.kingdom().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test(start_paused = true)]
async fn test_calls_are_bounded_by_the_timeout() {
    let service = MockDataService::new()
        .value("/assembly.Assembly/get_dna_size", 4_641_652.into())
        .delay("/assembly.Assembly/get_dna_size", Duration::from_secs(60));

    let config = ClientConfig::new()
        .object_ref("1/2/3")
        .url("http://svc")
        .timeout_ms(250)
        .validate()
        .unwrap();

    let assembly = Assembly::with_connector(config, service.connector(Default::default()));
    let err = assembly.dna_size().await.unwrap_err();

    assert!(matches!(err, ClientError::Timeout(t) if t == Duration::from_millis(250)));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_largest_timeout_still_completes_calls() {
    let service = MockDataService::new().value("/taxon.Taxon/get_kingdom", "Bacteria".into());

    let config = ClientConfig::new()
        .object_ref("1/2/3")
        .url("http://svc")
        .timeout_ms(u64::MAX)
        .validate()
        .unwrap();
    assert_eq!(config.timeout(), MAX_TIMEOUT);

    let taxon = Taxon::with_connector(config, service.connector(Default::default()));

    assert_eq!(taxon.kingdom().await.unwrap().as_deref(), Some("Bacteria"));
    assert!(service.calls()[0].timeout_header.is_some());
}

#[tokio::test]
async fn test_timeout_is_forwarded_to_the_service() {
    let service = MockDataService::new().value("/assembly.Assembly/get_dna_size", 10.into());

    let assembly = Assembly::with_connector(common::config(), service.connector(Default::default()));
    assembly.dna_size().await.unwrap();

    let header = service.calls()[0].timeout_header.clone();
    assert!(header.is_some(), "grpc-timeout header was not sent");
}

#[tokio::test]
async fn test_unknown_methods_surface_the_status() {
    let service = MockDataService::new();

    let taxon = Taxon::with_connector(common::config(), service.connector(Default::default()));
    let err = taxon.kingdom().await.unwrap_err();

    match err {
        ClientError::Transport(status) => assert_eq!(status.code(), Code::Unimplemented),
        other => panic!("Expected a transport failure, got {other:?}"),
    }
}
