//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, paired with a body as `(Status, body)`, or
//! as a bare handler return value.
//!
//! ```rust
//! use recipes::{Request, Response, Status};
//!
//! // status-only, no body
//! Response::status(Status::NoContent);
//!
//! // return Status directly from a handler
//! async fn delete_recipe(_req: Request, _state: ()) -> Status {
//!     Status::NoContent
//! }
//! ```

use http::StatusCode;

/// The status codes this service answers with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Created,             // 201
    NoContent,           // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
}

impl From<Status> for StatusCode {
    fn from(s: Status) -> StatusCode {
        match s {
            Status::Created             => StatusCode::CREATED,
            Status::NoContent           => StatusCode::NO_CONTENT,
            Status::BadRequest          => StatusCode::BAD_REQUEST,
            Status::NotFound            => StatusCode::NOT_FOUND,
            Status::MethodNotAllowed    => StatusCode::METHOD_NOT_ALLOWED,
            Status::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
