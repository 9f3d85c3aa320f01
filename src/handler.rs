//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The server holds exactly one handler, but its concrete type is whatever
//! closure or `async fn` the user passed in. We hide it behind a trait object
//! (`dyn ErasedHandler`) so [`Server`](crate::Server) is not generic over it.
//!
//! ```text
//! async fn app(req: Request, res: Response) { … }   ← user writes this
//!        ↓ server.serve(app)
//! app.into_boxed_handler()                         ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(app))                         ← heap-allocated wrapper
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(req, res)  at request time          ← one vtable dispatch
//!        ↓
//! Box::pin(async { app(req, res).await.report() }) ← BoxFuture
//! ```

use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::error;

use crate::request::Request;
use crate::response::Response;

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased handler future.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request, res: Response) -> BoxFuture;
}

#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Handler output ────────────────────────────────────────────────────────────

/// What a handler may return: nothing, or a `Result` whose error is logged.
///
/// The response is owned by the handler, so an error here cannot change what
/// the client sees; dropping an unfinished [`Response`] still answers it.
pub trait Outcome: Send + 'static {
    #[doc(hidden)]
    fn report(self);
}

impl Outcome for () {
    fn report(self) {}
}

impl<E: Display + Send + 'static> Outcome for Result<(), E> {
    fn report(self) {
        if let Err(e) = self {
            error!(error = %e, "handler failed");
        }
    }
}

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` (or closure returning a future) with the signature:
///
/// ```text
/// async fn name(req: Request, res: Response) -> () | Result<(), impl Display>
/// ```
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut> private::Sealed for F
where
    F: Fn(Request, Response) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: Outcome,
{
}

impl<F, Fut> Handler for F
where
    F: Fn(Request, Response) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: Outcome,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

struct FnHandler<F>(F);

impl<F, Fut> ErasedHandler for FnHandler<F>
where
    F: Fn(Request, Response) -> Fut + Send + Sync,
    Fut: Future + Send + 'static,
    Fut::Output: Outcome,
{
    fn call(&self, req: Request, res: Response) -> BoxFuture {
        let fut = (self.0)(req, res);
        Box::pin(async move { fut.await.report() })
    }
}
