//! HTTP pipeline for Session Client.
//!
//! Every request flows through the same stages:
//! - Request interceptor: attaches the stored bearer credential
//! - Transport: executes the request against the configured origin
//! - Response interceptor: classifies failures, notifies, ends expired sessions

mod interceptor;
mod pipeline;
mod request;
mod response;
mod transport;

pub use interceptor::*;
pub use pipeline::*;
pub use request::*;
pub use response::*;
pub use transport::*;
