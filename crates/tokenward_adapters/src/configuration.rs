use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use tokenward_core::config::{default_user_agent, Settings, DEFAULT_BASE_URL, DEFAULT_SERVICE_NAME};

pub fn get_configuration_with_paths(
    current_dir_path: Option<PathBuf>,
    system_config_dir_path: Option<PathBuf>,
) -> Result<Settings, config::ConfigError> {
    let config_directory = current_dir_path.unwrap_or_else(|| {
        std::env::current_dir()
            .map(|p| p.join("config"))
            .unwrap_or_else(|_| PathBuf::from("config"))
    });

    let system_config_dir = if let Some(path) = system_config_dir_path {
        path
    } else {
        ProjectDirs::from("com", "tokenward", "tokenward")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("config"))
    };

    let settings = Config::builder()
        // Remote API
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("api.user_agent", default_user_agent())?
        // Token persistence (enums serialize to lowercase strings)
        .set_default("storage.backend", "file")?
        .set_default("storage.service", DEFAULT_SERVICE_NAME)?
        .set_default("log_level", "info")?
        .add_source(File::from(system_config_dir.join("config.toml")).required(false))
        .add_source(File::from(config_directory.join("config.toml")).required(false))
        .add_source(Environment::with_prefix("TOKENWARD").separator("__"))
        .build()?;

    settings.try_deserialize::<Settings>()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    get_configuration_with_paths(None, None)
}
