use log::info;

use crate::registry::RegistryConfig;

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct SerializedConfig {
    address: String,
    #[serde(default)]
    base_path: String,
    registry: RegistryConfig,
}

#[derive(Debug)]
pub struct Config {
    pub address: std::net::SocketAddr,
    /// Mount prefix segments, empty to serve from the root
    pub base_path: Vec<String>,
    pub registry: RegistryConfig,
}

impl Config {
    pub fn read(path: &str) -> Result<Self, ConfigError> {
        info!("Reading config from: {}", path);
        let file = std::fs::File::open(path).map_err(|source| ConfigError::File {
            path: String::from(path),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, ConfigError> {
        let serde_config: SerializedConfig = serde_json::from_reader(reader)?;
        Self::try_from(serde_config)
    }
}

impl TryFrom<SerializedConfig> for Config {
    type Error = ConfigError;

    fn try_from(
        SerializedConfig {
            address,
            base_path,
            registry,
        }: SerializedConfig,
    ) -> Result<Self, Self::Error> {
        let address = address.parse()?;
        let base_path = parse_base_path(&base_path)?;
        Ok(Config {
            address,
            base_path,
            registry,
        })
    }
}

fn parse_base_path(base_path: &str) -> Result<Vec<String>, ConfigError> {
    base_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let valid = segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'));
            if valid {
                Ok(String::from(segment))
            } else {
                Err(ConfigError::BasePath(String::from(base_path)))
            }
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read ({path}): {source}")]
    File {
        path: String,
        source: std::io::Error,
    },
    #[error("could not parse: {0}")]
    Parsing(#[from] serde_json::Error),
    #[error("bad address: {0}")]
    Address(#[from] std::net::AddrParseError),
    #[error("bad base path: {0:?}")]
    BasePath(String),
}
