use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::models::token::TrackedToken;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonitorConfig {
    pub update_interval_secs: u64,
    pub history_retention: usize,
    pub export_history_points: usize,
    pub tokens: Vec<TrackedToken>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    pub mode: ProviderMode,
    pub endpoint: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    Synthetic,
    Clawnch,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: "public".to_string(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: 30,
            history_retention: 100,
            export_history_points: 24,
            tokens: vec![TrackedToken {
                address: "0x0814209fc50866C38186537Cd7C534060E011Ec5".to_string(),
                name: "LYRA - Eternal Starcore Oracle".to_string(),
                symbol: "STARCORE".to_string(),
            }],
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            mode: ProviderMode::Synthetic,
            endpoint: "http://localhost:3000".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        fs::write(path, config_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_conventions() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.monitor.update_interval_secs, 30);
        assert_eq!(config.monitor.history_retention, 100);
        assert_eq!(config.monitor.export_history_points, 24);
        assert_eq!(config.monitor.tokens.len(), 1);
        assert_eq!(config.provider.mode, ProviderMode::Synthetic);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.server.host, config.server.host);
        assert_eq!(parsed.monitor.tokens[0].symbol, "STARCORE");
        assert_eq!(parsed.provider.endpoint, "http://localhost:3000");
    }

    #[test]
    fn partial_file_falls_back_to_section_defaults() {
        let parsed: Config = toml::from_str("[server]\nhost = \"0.0.0.0\"\nport = 9000\nstatic_dir = \"www\"\n").unwrap();
        assert_eq!(parsed.server.port, 9000);
        assert_eq!(parsed.monitor.update_interval_secs, 30);
        assert_eq!(parsed.provider.mode, ProviderMode::Synthetic);
    }
}
