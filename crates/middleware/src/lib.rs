//! Tower middleware that attaches per-request credential overrides.
//!
//! The layer runs the header extraction once per request and stores the result in the
//! request extensions. Handlers read it back with the [`PassthroughCredentials`] extractor.
//! Requests are never rejected: when nothing is extracted the request continues unchanged
//! and the default credentials apply.

use std::{
    convert::Infallible,
    sync::Arc,
    task::{Context, Poll},
};

use axum::extract::FromRequestParts;
use config::PassthroughConfig;
use credentials::{CredentialOverrides, ExtractedCredentials, extract_credentials};
use http::{Request, request::Parts};
use tower::Layer;

#[derive(Clone)]
pub struct CredentialPassthroughLayer(Arc<PassthroughConfig>);

impl CredentialPassthroughLayer {
    pub fn new(config: PassthroughConfig) -> Self {
        Self(Arc::new(config))
    }
}

impl<Service> Layer<Service> for CredentialPassthroughLayer {
    type Service = CredentialPassthroughService<Service>;

    fn layer(&self, next: Service) -> Self::Service {
        CredentialPassthroughService {
            next,
            config: self.0.clone(),
        }
    }
}

#[derive(Clone)]
pub struct CredentialPassthroughService<Service> {
    next: Service,
    config: Arc<PassthroughConfig>,
}

impl<Service, ReqBody> tower::Service<Request<ReqBody>> for CredentialPassthroughService<Service>
where
    Service: tower::Service<Request<ReqBody>>,
{
    type Response = Service::Response;
    type Error = Service::Error;
    type Future = Service::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.next.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        // overrides reach handlers only through the passthrough gate
        req.extensions_mut().remove::<ExtractedCredentials>();

        if let Some(credentials) = extract_credentials(&req, &self.config) {
            req.extensions_mut().insert(credentials);
        }

        self.next.call(req)
    }
}

/// Credential overrides extracted by [`CredentialPassthroughLayer`], if any.
#[derive(Debug, Clone, Default)]
pub struct PassthroughCredentials(pub Option<ExtractedCredentials>);

impl PassthroughCredentials {
    /// Materialize the overrides for field access.
    pub fn overrides(&self) -> Option<CredentialOverrides> {
        self.0.as_ref().map(CredentialOverrides::from)
    }
}

impl<S> FromRequestParts<S> for PassthroughCredentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let credentials = parts.extensions.get::<ExtractedCredentials>().cloned();

        if credentials.is_none() {
            log::trace!("No credential overrides for {}", parts.uri.path());
        }

        Ok(Self(credentials))
    }
}
