//! An in-process data service the clients can talk to without a network.
//!
//! Routes are keyed by the full call path (e.g. `/taxon.Taxon/get_parent`). Every call is
//! recorded so tests can inspect the envelope the client sent.
#![allow(dead_code)]

use data_api_core::{
    BoxError, ClientConfig, FaultKind, RemoteFault, ValidatedConfig,
    rpc::{CallEnvelope, codec::JsonCodec, fault::status_from_fault},
};
use serde_json::Value;
use std::{
    collections::HashMap,
    convert::Infallible,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tonic::{
    Status,
    codegen::{BoxFuture, Context, Poll, Service, http},
    server::UnaryService,
};

pub type Handler = Arc<dyn Fn(&CallEnvelope<Value>) -> Result<Value, Status> + Send + Sync>;

#[derive(Clone)]
pub enum Reply {
    Value(Value),
    Fault(FaultKind, RemoteFault),
    Status(Status),
    Handler(Handler),
}

#[derive(Clone)]
struct Route {
    reply: Reply,
    delay: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub timeout_header: Option<String>,
    pub envelope: CallEnvelope<Value>,
}

#[derive(Clone, Default)]
pub struct MockDataService {
    routes: HashMap<String, Route>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockDataService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, reply: Reply) -> Self {
        self.routes
            .insert(path.to_string(), Route { reply, delay: None });
        self
    }

    pub fn value(self, path: &str, value: Value) -> Self {
        self.route(path, Reply::Value(value))
    }

    pub fn fault(self, path: &str, kind: FaultKind, message: &str) -> Self {
        self.route(path, Reply::Fault(kind, RemoteFault::new(message)))
    }

    pub fn handler<F>(self, path: &str, handler: F) -> Self
    where
        F: Fn(&CallEnvelope<Value>) -> Result<Value, Status> + Send + Sync + 'static,
    {
        self.route(path, Reply::Handler(Arc::new(handler)))
    }

    /// Delays the answer of an already registered route.
    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.get_mut(path) {
            route.delay = Some(delay);
        }
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// A connector handing out clones of this service, counting how many transports it built.
    pub fn connector(
        &self,
        built: Arc<AtomicUsize>,
    ) -> impl Fn(&str, Duration) -> Result<MockDataService, BoxError> + Send + Sync + 'static {
        let service = self.clone();
        move |_url: &str, _timeout: Duration| {
            built.fetch_add(1, Ordering::SeqCst);
            Ok(service.clone())
        }
    }
}

pub fn config() -> ValidatedConfig {
    ClientConfig::new()
        .object_ref("1779/1054/1")
        .url("http://localhost:50051")
        .token("secret-token")
        .validate()
        .unwrap()
}

struct Method {
    path: String,
    route: Route,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl UnaryService<CallEnvelope<Value>> for Method {
    type Response = Value;
    type Future = BoxFuture<tonic::Response<Value>, Status>;

    fn call(&mut self, request: tonic::Request<CallEnvelope<Value>>) -> Self::Future {
        let timeout_header = request
            .metadata()
            .get("grpc-timeout")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let envelope = request.into_inner();

        self.calls.lock().unwrap().push(RecordedCall {
            path: self.path.clone(),
            timeout_header,
            envelope: envelope.clone(),
        });

        let route = self.route.clone();

        Box::pin(async move {
            if let Some(delay) = route.delay {
                tokio::time::sleep(delay).await;
            }

            let answer: Result<Value, Status> = match route.reply {
                Reply::Value(value) => Ok(value),
                Reply::Fault(kind, fault) => Err(status_from_fault(kind, &fault)),
                Reply::Status(status) => Err(status),
                Reply::Handler(handler) => handler(&envelope),
            };

            answer.map(tonic::Response::new)
        })
    }
}

impl<B> Service<http::Request<B>> for MockDataService
where
    B: http_body::Body + Send + 'static,
    B::Error: Into<BoxError> + Send + 'static,
{
    type Response = http::Response<tonic::body::Body>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let path = req.uri().path().to_string();

        let Some(route) = self.routes.get(&path).cloned() else {
            return Box::pin(async move {
                let status = Status::unimplemented(format!("no route for {path}"));
                Ok(status.into_http::<tonic::body::Body>())
            });
        };

        let method = Method {
            path,
            route,
            calls: Arc::clone(&self.calls),
        };

        Box::pin(async move {
            let codec = JsonCodec::<Value, CallEnvelope<Value>>::new();
            let mut grpc = tonic::server::Grpc::new(codec);
            Ok(grpc.unary(method, req).await)
        })
    }
}
