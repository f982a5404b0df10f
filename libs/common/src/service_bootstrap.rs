//! Service bootstrap utilities
//!
//! Startup banner, logging initialization and port resolution shared by
//! service binaries.

use crate::logging::{self, LogConfig};
use tracing::info;

/// Service metadata for startup
pub struct ServiceInfo {
    /// Service name (e.g., "studentsrv")
    pub name: String,
    /// Service version from Cargo.toml
    pub version: String,
    /// Service description
    pub description: String,
    /// Default port
    pub default_port: u16,
}

impl ServiceInfo {
    /// Create new service info
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        default_port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            default_port,
        }
    }
}

/// Print the startup banner
pub fn print_startup_banner(service: &ServiceInfo) {
    let banner = r#"
 ███████╗████████╗██╗   ██╗██████╗ ███████╗███╗   ██╗████████╗███████╗
 ██╔════╝╚══██╔══╝██║   ██║██╔══██╗██╔════╝████╗  ██║╚══██╔══╝██╔════╝
 ███████╗   ██║   ██║   ██║██║  ██║█████╗  ██╔██╗ ██║   ██║   ███████╗
 ╚════██║   ██║   ██║   ██║██║  ██║██╔══╝  ██║╚██╗██║   ██║   ╚════██║
 ███████║   ██║   ╚██████╔╝██████╔╝███████╗██║ ╚████║   ██║   ███████║
 ╚══════╝   ╚═╝    ╚═════╝ ╚═════╝ ╚══════╝╚═╝  ╚═══╝   ╚═╝   ╚══════╝
    "#;

    info!("{}", banner);
    info!(" {} v{}", service.name.to_uppercase(), service.version);
    info!(" {}", service.description);
    info!(" Default Port: {}", service.default_port);
}

/// Initialize logging for a service
///
/// Log directory priority:
/// 1. `STUDENTSRV_LOG_DIR` environment variable
/// 2. `log_dir` from configuration
/// 3. Default `logs`
pub fn init_logging(
    service: &ServiceInfo,
    level: &str,
    log_dir: Option<&str>,
    ansi: bool,
) -> anyhow::Result<()> {
    let log_config = LogConfig {
        service_name: service.name.clone(),
        log_dir: Some(logging::resolve_log_root(log_dir)),
        level: logging::parse_level(level),
        ansi,
    };

    logging::init_with_config(log_config).map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(())
}

/// Resolve the listening port
///
/// `SERVICE_PORT` overrides a port that was left at its default; an explicit
/// non-default config port always wins.
pub fn get_service_port(config_port: u16, service: &ServiceInfo) -> u16 {
    let is_default = config_port == 0 || config_port == service.default_port;

    if is_default {
        if let Some(p) = std::env::var("SERVICE_PORT")
            .ok()
            .and_then(|port| port.parse::<u16>().ok())
        {
            return p;
        }
    }

    if config_port > 0 {
        config_port
    } else {
        service.default_port
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_info_creation() {
        let service = ServiceInfo::new("studentsrv", "0.1.0", "Student records API", 6010);
        assert_eq!(service.name, "studentsrv");
        assert_eq!(service.description, "Student records API");
        assert_eq!(service.default_port, 6010);
    }

    #[test]
    fn test_explicit_port_wins() {
        let service = ServiceInfo::new("studentsrv", "0.1.0", "", 6010);
        assert_eq!(get_service_port(7000, &service), 7000);
    }
}
