use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayerConfig {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub greenfield: GreenfieldConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Log level for the relayer, used when `RUST_LOG` is not set
    pub log_level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GreenfieldConfig {
    /// Channels whose delivery sequences are exported as metrics.
    /// Not deduplicated here; a repeated channel fails metric registration.
    #[serde(default)]
    pub monitor_channel_list: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Metrics server host
    #[serde(default = "default_admin_host")]
    pub host: String,
    /// Metrics server port
    pub port: u16,
}

fn default_admin_host() -> String {
    "0.0.0.0".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: default_admin_host(),
            port: 8080,
        }
    }
}

impl RelayerConfig {
    /// Load configuration from TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RelayerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Address the metrics server listens on
    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .admin
            .host
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid admin host {:?}: {}", self.admin.host, e))?;
        Ok(SocketAddr::new(ip, self.admin.port))
    }

    /// Channels to monitor, in configuration order
    pub fn monitor_channels(&self) -> &[u8] {
        &self.greenfield.monitor_channel_list
    }
}

impl Default for RelayerConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            greenfield: GreenfieldConfig::default(),
            admin: AdminConfig::default(),
        }
    }
}
