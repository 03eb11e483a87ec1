//! HTTP server and graceful shutdown.
//!
//! On **SIGTERM** (Kubernetes, systemd) or **SIGINT** (Ctrl-C) the server:
//! 1. stops calling `listener.accept()`, so no new connections are made;
//! 2. asks every open connection to close once its current request is done;
//! 3. returns from [`Server::serve`], which lets `main` exit cleanly.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{Instrument, error, info, info_span, warn};

use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// The HTTP server, bound and ready to serve.
pub struct Server {
    listener: TcpListener,
    addr: SocketAddr,
}

impl Server {
    /// Binds a listener to `addr`. Port `0` picks a free port; read it back
    /// with [`local_addr`](Server::local_addr).
    ///
    /// ```rust,no_run
    /// # async fn run() -> Result<(), recipes::Error> {
    /// use recipes::Server;
    /// let server = Server::bind("127.0.0.1:5000").await?;
    /// # Ok(()) }
    /// ```
    pub async fn bind(addr: impl ToSocketAddrs) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        Ok(Self { listener, addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serves `router` until SIGTERM or Ctrl-C, then drains in-flight
    /// connections.
    pub async fn serve<S>(self, router: Router<S>) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but stops when `signal` resolves.
    pub async fn serve_with_shutdown<S, F>(self, router: Router<S>, signal: F) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
        F: Future<Output = ()>,
    {
        let Self { listener, addr } = self;
        let router = Arc::new(router);

        info!(addr = %addr, "recipes listening");

        let mut tasks = JoinSet::new();
        let (drain_tx, drain_rx) = watch::channel(());
        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Shutdown is checked first so a signal stops accepting even
                // while connections are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    let mut drain = drain_rx.clone();

                    tasks.spawn(async move {
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(router, req).await }
                        });

                        let builder = ConnBuilder::new(TokioExecutor::new());
                        let conn = builder.serve_connection(io, svc);
                        tokio::pin!(conn);

                        // Idle keep-alive connections close at once; busy ones
                        // finish their current request first.
                        let result = tokio::select! {
                            res = conn.as_mut() => res,
                            _ = drain.changed() => {
                                conn.as_mut().graceful_shutdown();
                                conn.as_mut().await
                            }
                        };
                        if let Err(e) = result {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        let _ = drain_tx.send(());
        while tasks.join_next().await.is_some() {}

        info!("recipes stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Buffers one request, routes it and logs the outcome.
///
/// Every failure becomes a response, so hyper never sees an error.
async fn dispatch<S>(
    router: Arc<Router<S>>,
    req: hyper::Request<Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible>
where
    S: Clone + Send + Sync + 'static,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_owned();
    let span = info_span!("request", method = %parts.method, path = %path);

    let response = async {
        let Ok(method) = Method::try_from(&parts.method) else {
            return Response::status(Status::MethodNotAllowed);
        };
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!("failed to read request body: {e}");
                return Response::status(Status::BadRequest);
            }
        };
        let headers = parts.headers.iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_owned(), v.to_owned()))
            })
            .collect();

        router.handle(Request::new(method, path, headers, body)).await
    }
    .instrument(span.clone())
    .await;

    span.in_scope(|| {
        info!(
            status = response.status_code().as_u16(),
            elapsed_ms = whole_millis(started.elapsed()),
            "request handled"
        );
    });

    Ok(response.into_inner())
}

/// Milliseconds in `elapsed`, saturating at `u64::MAX`.
fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT the process receives.
///
/// If a handler cannot be installed that arm never resolves; the other still
/// works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}
