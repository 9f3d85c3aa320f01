//! A small hyper host that hands each request to one handler.
//!
//! There is no routing: the handler sees every request and answers it
//! through its [`Response`]. Each handler runs on its own task; the
//! connection only waits for the response head, then streams the body as
//! the handler writes it.
//!
//! # Graceful shutdown
//!
//! On **SIGTERM** or **Ctrl-C** (or the future given to
//! [`Server::serve_with_shutdown`]) the server:
//! 1. Stops `listener.accept()`, so no new connections are made.
//! 2. Lets every in-flight connection and handler task run to completion.
//! 3. Returns from [`Server::serve`].

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::handler::{BoxedHandler, ErasedHandler, Handler};
use crate::options::Options;
use crate::request::Request;
use crate::response::{Response, ResponseBody};

enum Listen {
    Addr(SocketAddr),
    Listener(TcpListener),
}

/// The HTTP server.
pub struct Server {
    listen: Listen,
    options: Options,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not a valid `host:port` string.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use respond::Server;
    /// let server = Server::bind("0.0.0.0:3000");
    /// ```
    pub fn bind(addr: &str) -> Self {
        let addr: SocketAddr = addr.parse().expect("invalid socket address");
        Self { listen: Listen::Addr(addr), options: Options::default() }
    }

    /// Serves on an already bound listener (e.g. `127.0.0.1:0` in tests).
    pub fn from_listener(listener: TcpListener) -> Self {
        Self { listen: Listen::Listener(listener), options: Options::default() }
    }

    /// Options applied to every [`Response`] this server creates.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        match &self.listen {
            Listen::Addr(addr) => Ok(*addr),
            Listen::Listener(listener) => Ok(listener.local_addr()?),
        }
    }

    /// Accepts connections until SIGTERM or Ctrl-C, then drains.
    pub async fn serve(self, handler: impl Handler) -> Result<(), Error> {
        self.serve_with_shutdown(handler, shutdown_signal()).await
    }

    /// Accepts connections until `signal` resolves, then drains.
    pub async fn serve_with_shutdown<F>(self, handler: impl Handler, signal: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let listener = match self.listen {
            Listen::Addr(addr) => TcpListener::bind(addr).await?,
            Listen::Listener(listener) => listener,
        };
        let addr = listener.local_addr()?;
        let handler = handler.into_boxed_handler();
        let options = self.options;

        info!(%addr, "respond listening");

        let mut connections = tokio::task::JoinSet::new();
        // Handlers outlive the dispatch that spawned them: dispatch returns as
        // soon as the head is ready, while the handler keeps writing the body.
        let handlers = TaskTracker::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                biased;

                () = &mut signal => {
                    info!(in_flight = connections.len(), "shutdown signal received, draining connections");
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

                    let handler = handler.clone();
                    let handlers = handlers.clone();
                    let io = TokioIo::new(stream);

                    connections.spawn(async move {
                        let svc = service_fn(move |req| {
                            dispatch(handler.clone(), handlers.clone(), options, req)
                        });

                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        while connections.join_next().await.is_some() {}
        handlers.close();
        handlers.wait().await;

        info!("respond stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Starts the handler for one request and waits for its response head.
///
/// Never fails: a handler that errors or panics still produces a head
/// through its dropped [`Response`].
async fn dispatch(
    handler: BoxedHandler,
    handlers: TaskTracker,
    options: Options,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<ResponseBody>, Infallible> {
    let req = Request::from(req);
    debug!(method = %req.method(), path = req.path(), "request");

    let (res, outgoing) = Response::new(req.method().clone(), options);
    handlers.spawn(handler.call(req, res));

    Ok(outgoing.into_http().await)
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C).
/// On Windows only Ctrl-C is available.
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
            Ok(mut sig) => {
                sig.recv().await;
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
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
