pub mod bootstrap;
pub mod configuration;
pub mod credentials;
pub mod http_api;
pub mod network;
pub mod telemetry;

// Re-exports for convenience
pub use bootstrap::{build_auth_service, build_credential_store, DefaultAuthService};
pub use credentials::{FileCredentialStore, MemoryCredentialStore};
pub use http_api::RestAuthApi;
pub use telemetry::TracingEventSink;
