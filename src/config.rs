use std::io::ErrorKind;
use std::path::Path;

use log::info;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::endpoints::Endpoints;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";
pub const DEFAULT_MOODS: [&str; 6] = ["happy", "sad", "energetic", "chill", "romantic", "angry"];

#[derive(Debug, Default, Deserialize)]
pub struct MoodItConfigFile {
    server: Option<String>,
    moods: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct MoodItConfig {
    pub server: Url,
    pub moods: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(serde_json::Error),
    #[error("Invalid server URL {0:?}: {1}")]
    InvalidServer(String, String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl TryFrom<MoodItConfigFile> for MoodItConfig {
    type Error = ConfigError;

    fn try_from(file_config: MoodItConfigFile) -> Result<Self, Self::Error> {
        let server = parse_server(file_config.server.as_deref().unwrap_or(DEFAULT_SERVER))?;
        let moods = match file_config.moods {
            Some(moods) if !moods.is_empty() => moods,
            _ => DEFAULT_MOODS.iter().map(|mood| mood.to_string()).collect(),
        };
        Ok(MoodItConfig { server, moods })
    }
}

pub fn parse_server(server: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(server)
        .map_err(|err| ConfigError::InvalidServer(server.to_string(), err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidServer(
            server.to_string(),
            format!("unsupported scheme {scheme}"),
        )),
    }
}

impl MoodItConfig {
    /// Reads the config file at `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file_config = match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str::<MoodItConfigFile>(&contents)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("No config file at {}, using defaults", path.display());
                MoodItConfigFile::default()
            }
            Err(err) => return Err(err.into()),
        };
        MoodItConfig::try_from(file_config)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.server.clone())
    }
}
