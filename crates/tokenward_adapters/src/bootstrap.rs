//! Wiring of the auth core from loaded settings.

use std::path::PathBuf;
use std::sync::Arc;

use directories::ProjectDirs;
use tokenward_core::config::{Settings, StorageBackend, StorageSettings};
use tokenward_core::ports::CredentialStore;
use tokenward_core::use_cases::AuthService;
use tokenward_core::{Error, Session};
use tracing::info;

use crate::credentials::{FileCredentialStore, MemoryCredentialStore};
use crate::http_api::RestAuthApi;
use crate::telemetry::TracingEventSink;

/// Auth service backed by the REST API and reporting through `tracing`
pub type DefaultAuthService = AuthService<RestAuthApi, TracingEventSink>;

/// Default directory of the file backend
fn default_data_dir(service: &str) -> PathBuf {
    ProjectDirs::from("com", service, service)
        .map(|d| d.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn build_credential_store(
    settings: &StorageSettings,
) -> Result<Arc<dyn CredentialStore>, Error> {
    let store: Arc<dyn CredentialStore> = match settings.backend {
        StorageBackend::File => {
            let dir = settings
                .path
                .clone()
                .unwrap_or_else(|| default_data_dir(&settings.service));
            Arc::new(FileCredentialStore::new(dir))
        }
        StorageBackend::Memory => Arc::new(MemoryCredentialStore::new()),
    };
    Ok(store)
}

/// Build the auth service, restoring any session persisted by a previous run
pub fn build_auth_service(settings: &Settings) -> Result<DefaultAuthService, Error> {
    let api = Arc::new(RestAuthApi::new(&settings.api)?);
    let store = build_credential_store(&settings.storage)?;
    let session = Arc::new(Session::restore(store)?);

    info!(
        base_url = %api.base_url(),
        backend = ?settings.storage.backend,
        status = %session.status(),
        "auth service ready"
    );

    Ok(AuthService::new(api, session, Arc::new(TracingEventSink)))
}
