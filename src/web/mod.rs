//! The HTTP face of the two handlers: routing, request ids, tracing and request logging.

mod error;
mod log;
pub mod midware;
pub mod routes;
mod serve;

pub use error::{Error, WebResult};
pub use serve::serve;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
