//! Command-line arguments shared by service binaries

#[cfg(feature = "cli")]
use clap::Parser;

/// Common service startup arguments
///
/// Every field is optional so that unset flags fall through to the layered
/// configuration.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", clap(author, version, about))]
pub struct ServiceArgs {
    /// Path to a YAML configuration file
    #[cfg_attr(feature = "cli", clap(short = 'c', long, env = "STUDENTSRV_CONFIG"))]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[cfg_attr(feature = "cli", clap(short = 'l', long))]
    pub log_level: Option<String>,

    /// Bind address override (e.g., 127.0.0.1:6010)
    #[cfg_attr(feature = "cli", clap(short = 'b', long, env = "BIND_ADDRESS"))]
    pub bind_address: Option<String>,

    /// SQLite database file override
    #[cfg_attr(feature = "cli", clap(long, env = "DB_PATH"))]
    pub db_path: Option<String>,

    /// SQL script to run after the schema is applied (seed data, fixes)
    #[cfg_attr(feature = "cli", clap(long))]
    pub init_script: Option<String>,

    /// Disable colored output (useful for log files)
    #[cfg_attr(feature = "cli", clap(long))]
    pub no_color: bool,

    /// Only validate configuration without starting service
    #[cfg_attr(feature = "cli", clap(long))]
    pub validate: bool,
}
