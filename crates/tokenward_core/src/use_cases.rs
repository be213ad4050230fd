mod auth_service;

pub use auth_service::{AuthService, FetchUserOutcome, LogoutOutcome};
