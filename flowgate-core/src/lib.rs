pub mod config;
pub mod credential;
pub mod destination;
pub mod error;
pub mod service;

pub use config::ServicesConfig;
pub use credential::{Credential, DiagnosticSink, TracingSink, parse_credentials, placeholder_credential};
pub use destination::ServiceDest;
pub use error::ConfigError;
pub use service::{Service, Services};
