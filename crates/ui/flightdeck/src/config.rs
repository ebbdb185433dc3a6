use std::path::PathBuf;
use std::{env, fs};

use directories::ProjectDirs;
use lazy_static::lazy_static;
use missions::LaunchDefaults;
use serde::Deserialize;
use tracing::warn;

/// Application configuration: endpoint of the mission service, forecast
/// settings, and the launch defaults every create request carries.
///
/// Layered from defaults, then `config.json5` / `config.toml` in the config
/// directory. The endpoint can additionally be overridden per invocation
/// with `--endpoint`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub config_dir: PathBuf,
    pub endpoint: String,
    pub weather: WeatherConfig,
    pub launch_defaults: LaunchDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            config_dir: PathBuf::new(),
            endpoint: "http://localhost:4000/graphql".to_string(),
            weather: WeatherConfig::default(),
            launch_defaults: LaunchDefaults::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base: String,
    /// Provider API key; supplied via config file, never a source literal.
    pub key: String,
    pub location: String,
    pub days: u8,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base: "https://api.weatherapi.com/v1".to_string(),
            key: String::new(),
            location: "Israel".to_string(),
            days: 5,
        }
    }
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl AppConfig {
    pub fn new() -> Result<Self, config::ConfigError> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_str().unwrap())?
            .set_default("config_dir", config_dir.to_str().unwrap())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            warn!("No configuration file found, running on built-in defaults");
        }

        let cfg: Self = builder.build()?.try_deserialize()?;

        Ok(cfg)
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "solarrocket", env!("CARGO_PKG_NAME"))
}

pub fn ensure_data_and_config_dirs_exist() -> std::io::Result<()> {
    let data_dir = get_data_dir();
    let config_dir = get_config_dir();

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.endpoint, "http://localhost:4000/graphql");
        assert_eq!(cfg.weather.days, 5);
        assert_eq!(cfg.launch_defaults.vehicle, "Epsilon IV");
        assert!(cfg.weather.key.is_empty());
    }

    #[test]
    fn config_deserializes_partial_overrides() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{ "endpoint": "https://rockets.example/graphql", "weather": { "days": 3 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.endpoint, "https://rockets.example/graphql");
        assert_eq!(cfg.weather.days, 3);
        // untouched sections keep their defaults
        assert_eq!(cfg.weather.location, "Israel");
        assert_eq!(cfg.launch_defaults.periapsis, 700);
    }
}
