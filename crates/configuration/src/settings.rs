use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

fn default_db_port() -> u16 {
    3306
}

fn default_server_port() -> u16 {
    8000
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "https://localhost:3000".to_string(),
    ]
}

/// Connection parameters for the MySQL store.
///
/// Every field may be empty; completeness is checked when a connection is
/// requested, not at startup.
#[derive(Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// The database (schema) name.
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            user: String::new(),
            password: String::new(),
            name: String::new(),
            port: default_db_port(),
        }
    }
}

impl DatabaseSettings {
    /// True when host, user, password and database name are all present.
    pub fn is_complete(&self) -> bool {
        [&self.host, &self.user, &self.password, &self.name]
            .iter()
            .all(|value| !value.is_empty())
    }

    /// Loose check reported by the health endpoint: host and user are set.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.user.is_empty()
    }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .field("name", &self.name)
            .field("port", &self.port)
            .finish()
    }
}

/// HTTP listener and CORS settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_server_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl ServerSettings {
    /// The address the HTTP server should listen on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind_address.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "BIND_ADDRESS '{}' is not a valid IP address",
                self.bind_address
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// Directory for daily-rolling log files. Logs go to stdout only when unset.
    #[serde(default)]
    pub dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> DatabaseSettings {
        DatabaseSettings {
            host: "localhost".to_string(),
            user: "pos".to_string(),
            password: "secret".to_string(),
            name: "pos_db".to_string(),
            port: 3306,
        }
    }

    #[test]
    fn any_missing_field_makes_settings_incomplete() {
        assert!(complete().is_complete());

        let clears: [fn(&mut DatabaseSettings); 4] = [
            |s| s.host.clear(),
            |s| s.user.clear(),
            |s| s.password.clear(),
            |s| s.name.clear(),
        ];
        for clear in clears {
            let mut settings = complete();
            clear(&mut settings);
            assert!(!settings.is_complete());
        }
    }

    #[test]
    fn configured_only_needs_host_and_user() {
        let mut settings = complete();
        settings.password.clear();
        settings.name.clear();
        assert!(settings.is_configured());

        settings.user.clear();
        assert!(!settings.is_configured());
    }

    #[test]
    fn debug_output_masks_password() {
        let rendered = format!("{:?}", complete());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn socket_addr_rejects_hostnames() {
        let mut server = ServerSettings::default();
        assert_eq!(server.socket_addr().unwrap(), "0.0.0.0:8000".parse().unwrap());

        server.bind_address = "localhost".to_string();
        assert!(matches!(server.socket_addr(), Err(ConfigError::ValidationError(_))));
    }
}
