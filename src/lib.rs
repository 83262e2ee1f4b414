//! A reference service for HTTP status codes.
//!
//! Every endpoint describes one status code (or a class of them) and answers
//! with that very code on the status line.

pub mod config;
pub mod error;
pub mod http_body;
pub mod http_request;
pub mod http_response;
pub mod http_status;
pub mod payload;
pub mod registry;
pub mod router;
pub mod server;
pub mod status_class;
pub mod synthesizer;
pub mod wire_status;

pub use config::Config;
pub use error::{ApiError, StatusError};
pub use payload::ResponsePayload;
pub use registry::{StatusCodeDescriptor, StatusCodeRegistry};
pub use server::Server;
pub use status_class::StatusClass;
pub use synthesizer::{RequestContext, ResponseSynthesizer, StatusResponse};
