//! Kubernetes health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! Both are generic over the router state, so they register on any router:
//!
//! ```rust,no_run
//! use recipes::{Method, Router, health};
//!
//! let app = Router::new()
//!     .on(Method::Get, "/healthz", health::liveness)
//!     .on(Method::Get, "/readyz",  health::readiness);
//! ```

use crate::{Request, Response};

/// Liveness probe. Always `200 OK` with body `"ok"`.
pub async fn liveness<S>(_req: Request, _state: S) -> Response {
    Response::text("ok")
}

/// Readiness probe. `200 OK` with body `"ready"`; the in-memory store has no
/// warm-up period and no dependencies to wait on.
pub async fn readiness<S>(_req: Request, _state: S) -> Response {
    Response::text("ready")
}
