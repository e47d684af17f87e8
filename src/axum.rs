//! Axum integration utilities.

use std::future::poll_fn;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::guard::{RouteDecision, RouteGuard};
use crate::state::AuthCell;

use ::axum::body::Body;
use ::axum::response::{IntoResponse, Response};
use ::http::{Request, StatusCode};
use ::tower::{Layer, Service};

/// Middleware layer that gates a route on a [`RouteGuard`] evaluated
/// against the shared auth-state cell.
///
/// Decision mapping: `Render` forwards the request; `Loading` answers 503
/// (retryable, not an auth verdict); `Fallback` answers 401; `Denied`
/// answers 403 with the denial reason in the body.
#[derive(Debug, Clone)]
pub struct RouteGuardLayer {
    cell: AuthCell,
    guard: Arc<RouteGuard>,
}

impl RouteGuardLayer {
    /// Creates a new guard layer.
    pub fn new(cell: AuthCell, guard: RouteGuard) -> Self {
        Self {
            cell,
            guard: Arc::new(guard),
        }
    }
}

impl<Inner> Layer<Inner> for RouteGuardLayer {
    type Service = RouteGuardService<Inner>;

    fn layer(&self, inner: Inner) -> Self::Service {
        RouteGuardService {
            inner,
            cell: self.cell.clone(),
            guard: self.guard.clone(),
        }
    }
}

/// Middleware service that enforces a [`RouteGuard`].
#[derive(Debug, Clone)]
pub struct RouteGuardService<Inner> {
    inner: Inner,
    cell: AuthCell,
    guard: Arc<RouteGuard>,
}

impl<Inner> Service<Request<Body>> for RouteGuardService<Inner>
where
    Inner: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    Inner::Future: Send + 'static,
{
    type Response = Response;
    type Error = Inner::Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();
        let decision = self.guard.evaluate(&self.cell.snapshot());

        Box::pin(async move {
            match decision {
                RouteDecision::Render => {
                    poll_fn(|cx| inner.poll_ready(cx)).await?;
                    inner.call(req).await
                }
                RouteDecision::Loading => {
                    Ok((StatusCode::SERVICE_UNAVAILABLE, "auth state loading").into_response())
                }
                RouteDecision::Fallback => {
                    Ok((StatusCode::UNAUTHORIZED, "authentication required").into_response())
                }
                RouteDecision::Denied(reason) => {
                    Ok((StatusCode::FORBIDDEN, reason.to_string()).into_response())
                }
            }
        })
    }
}
