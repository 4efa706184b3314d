//! HTTP surface of the divination service.
//!
//! `api_router()` returns a composable `Router`; `server::run` binds it and
//! serves until shutdown. Handlers only validate input and delegate to the
//! divination engine and the provider registry.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{run, ServerError};
pub use types::ApiContext;
