use crate::error::{Result, StudentSrvError};
use common::config_loader::load_config;
use common::ServiceArgs;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Service name, also the env var prefix and config file stem
pub const SERVICE_NAME: &str = "studentsrv";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 6010;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentsrvConfig {
    pub service: ServiceConfig,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Service identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub description: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: SERVICE_NAME.to_string(),
            description: "Student records API".to_string(),
        }
    }
}

/// HTTP listener
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// SQLite file location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/school.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
        }
    }
}

impl StudentsrvConfig {
    /// Load layered configuration, then apply CLI overrides
    pub fn load(args: &ServiceArgs) -> Result<Self> {
        let mut config: Self = load_config(SERVICE_NAME, args.config.as_deref().map(Path::new))
            .map_err(|e| StudentSrvError::Config(e.to_string()))?;
        config.apply_args(args)?;
        Ok(config)
    }

    /// Apply command-line overrides on top of file/env values
    pub fn apply_args(&mut self, args: &ServiceArgs) -> Result<()> {
        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }
        if let Some(path) = &args.db_path {
            self.database.path = path.clone();
        }
        if let Some(bind) = &args.bind_address {
            let (host, port) = bind.rsplit_once(':').ok_or_else(|| {
                StudentSrvError::Config(format!("Invalid bind address '{}', expected host:port", bind))
            })?;
            self.api.host = host.to_string();
            self.api.port = port.parse().map_err(|_| {
                StudentSrvError::Config(format!("Invalid port in bind address '{}'", bind))
            })?;
        }
        Ok(())
    }

    /// Check values that would only fail later at startup
    pub fn validate(&self) -> Result<()> {
        if self.api.host.trim().is_empty() {
            return Err(StudentSrvError::Config("api.host must not be empty".into()));
        }
        if self.database.path.trim().is_empty() {
            return Err(StudentSrvError::Config(
                "database.path must not be empty".into(),
            ));
        }
        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(StudentSrvError::Config(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
