//! # recipes
//!
//! An in-memory recipe service: list, read, create, update and delete
//! recipes over HTTP/JSON. Nothing is persisted; the collection lives as
//! long as the process.
//!
//! The HTTP layer underneath is deliberately small:
//!
//! - Radix-tree routing, one tree per method, via [`matchit`]
//! - Async I/O on tokio and hyper (HTTP/1.1 and HTTP/2)
//! - Typed router state handed to every handler
//! - Graceful shutdown on SIGTERM / Ctrl-C, draining in-flight requests
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use recipes::{RecipeStore, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), recipes::Error> {
//!     let app = recipes::router(RecipeStore::seeded());
//!     Server::bind("127.0.0.1:5000").await?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod routes;
mod server;
mod settings;
mod status;
mod store;

pub mod health;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use routes::{RecipeError, router};
pub use server::Server;
pub use settings::Settings;
pub use status::Status;
pub use store::{Recipe, RecipeInput, RecipeStore};
