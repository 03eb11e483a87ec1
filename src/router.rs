//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler, and every handler receives a clone of the router's state.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router<S = ()> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

/// Outcome of resolving a method + path pair.
enum Route<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router<()> {
    /// A router whose handlers take `()` as their state.
    pub fn new() -> Self {
        Self::with_state(())
    }
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// A router that hands a clone of `state` to every handler call.
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use recipes::{Method, Request, Response, Router};
    /// # async fn get_recipe(_: Request, _: ()) -> Response { Response::text("") }
    /// # async fn create_recipe(_: Request, _: ()) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,  "/recipes/{id}", get_recipe)
    ///     .on(Method::Post, "/recipes",      create_recipe);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    /// Routes one request and runs its handler.
    ///
    /// Unknown paths answer `404`; known paths under an unregistered method
    /// answer `405` with an `allow` header. `HEAD` falls back to `GET`.
    pub(crate) async fn handle(&self, mut req: Request) -> Response {
        match self.resolve(req.method, &req.path) {
            Route::Found(handler, params) => {
                req.params = params;
                handler.call(req, self.state.clone()).await
            }
            Route::MethodNotAllowed(allowed) => {
                let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
                Response::builder()
                    .status(Status::MethodNotAllowed)
                    .header("allow", &allow)
                    .no_body()
            }
            Route::NotFound => Response::status(Status::NotFound),
        }
    }

    fn resolve(&self, method: Method, path: &str) -> Route<S> {
        if let Some((handler, params)) = self.lookup(method, path) {
            return Route::Found(handler, params);
        }
        if method == Method::Head {
            if let Some((handler, params)) = self.lookup(Method::Get, path) {
                return Route::Found(handler, params);
            }
        }

        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(m, _)| *m)
            .collect();
        if allowed.is_empty() {
            return Route::NotFound;
        }
        allowed.sort_by_key(|m| m.as_str());
        Route::MethodNotAllowed(allowed)
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router<()> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::StatusCode;

    use super::*;

    async fn echo_id(req: Request, _state: ()) -> String {
        req.param("id").unwrap_or_default().to_owned()
    }

    async fn counter(_req: Request, state: u32) -> String {
        state.to_string()
    }

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path, Vec::new(), Bytes::new())
    }

    #[tokio::test]
    async fn extracts_path_params() {
        let router = Router::new().on(Method::Get, "/items/{id}", echo_id);
        let resp = router.handle(request(Method::Get, "/items/17")).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body, b"17");
    }

    #[tokio::test]
    async fn passes_state_to_handlers() {
        let router = Router::with_state(7u32).on(Method::Get, "/n", counter);
        let resp = router.handle(request(Method::Get, "/n")).await;
        assert_eq!(resp.body, b"7");
    }

    #[tokio::test]
    async fn unknown_path_is_404_without_body() {
        let router = Router::new().on(Method::Get, "/items/{id}", echo_id);
        let resp = router.handle(request(Method::Get, "/nothing")).await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert!(resp.body.is_empty());
    }

    #[tokio::test]
    async fn wrong_method_is_405_with_allow() {
        let router = Router::new()
            .on(Method::Put, "/items/{id}", echo_id)
            .on(Method::Get, "/items/{id}", echo_id);
        let resp = router.handle(request(Method::Post, "/items/1")).await;
        assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers, vec![("allow".to_owned(), "GET, PUT".to_owned())]);
    }

    #[tokio::test]
    async fn head_falls_back_to_get() {
        let router = Router::new().on(Method::Get, "/items/{id}", echo_id);
        let resp = router.handle(request(Method::Head, "/items/5")).await;
        assert_eq!(resp.status, StatusCode::OK);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_routes_panic() {
        let _ = Router::new()
            .on(Method::Get, "/items/{id}", echo_id)
            .on(Method::Get, "/items/{key}", echo_id);
    }
}
