use crate::domain::TemperatureUnit;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    hub: Hub,
    assistant: Assistant,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("DOMOBRIDGE").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    devices_file: String,
}

impl Core {
    pub fn devices_file(&self) -> &str {
        &self.devices_file
    }
}

#[derive(Debug, Deserialize)]
pub struct Hub {
    url: String,
    username: String,
    password: String,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
    #[serde(with = "humantime_serde")]
    retry_delay: Duration,
    #[serde(with = "humantime_serde")]
    retry_max_delay: Duration,
    retry_attempts: usize,
    #[serde(default)]
    temperature_unit: TemperatureUnit,
}

impl Hub {
    pub fn url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn retry_max_delay(&self) -> Duration {
        self.retry_max_delay
    }

    pub fn retry_attempts(&self) -> usize {
        self.retry_attempts
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.temperature_unit
    }
}

#[derive(Debug, Deserialize)]
pub struct Assistant {
    agent_user_id: String,
}

impl Assistant {
    pub fn agent_user_id(&self) -> &str {
        &self.agent_user_id
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    devices_file: "tests/resources/devices.json".to_string(),
                },
                hub: Hub {
                    url: "http://domoticz.local:8080".to_string(),
                    username: "user".to_string(),
                    password: "pass".to_string(),
                    timeout: Duration::from_secs(5),
                    retry_delay: Duration::from_millis(10),
                    retry_max_delay: Duration::from_millis(20),
                    retry_attempts: 2,
                    temperature_unit: TemperatureUnit::Celsius,
                },
                assistant: Assistant {
                    agent_user_id: "agent".to_string(),
                },
            },
        }
    }

    pub fn hub_url(mut self, url: String) -> Self {
        self.config.hub.url = url;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.hub.timeout = timeout;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
