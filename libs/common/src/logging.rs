//! Logging setup for the student records service
//!
//! Console output plus a daily rolling log file, both in the bracketed
//! `timestamp [LEVEL] message` format. HTTP access lines go to the
//! `api_access` target and into their own `{service}_api` file.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter,
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Target used for HTTP access lines
pub const API_ACCESS_TARGET: &str = "api_access";

/// Bracketed tag and ANSI color for a level
fn level_style(level: Level) -> (&'static str, &'static str) {
    match level {
        Level::ERROR => ("[ERROR]", "\x1b[31m"),
        Level::WARN => ("[WARN]", "\x1b[33m"),
        Level::INFO => ("[INFO]", "\x1b[32m"),
        Level::DEBUG => ("[DEBUG]", "\x1b[34m"),
        Level::TRACE => ("[TRACE]", "\x1b[35m"),
    }
}

/// `2025-12-02T00:50:44.809123Z [INFO] message`
struct BracketedLevelFormat;

impl<S, N> FormatEvent<S, N> for BracketedLevelFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ");
        let (tag, color) = level_style(*event.metadata().level());

        if writer.has_ansi_escapes() {
            write!(writer, "{timestamp} {color}{tag}\x1b[0m ")?;
        } else {
            write!(writer, "{timestamp} {tag} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// Non-blocking writer guards live for the whole process
static GUARDS: OnceLock<Mutex<Vec<WorkerGuard>>> = OnceLock::new();

/// Log root directory
///
/// `STUDENTSRV_LOG_DIR` wins over the configured directory, which wins over
/// `logs`.
pub fn resolve_log_root(config_dir: Option<&str>) -> PathBuf {
    std::env::var("STUDENTSRV_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(config_dir.unwrap_or("logs")))
}

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Service name, used as the file prefix and the default debug target
    pub service_name: String,
    /// Directory for log files; `None` disables file output
    pub log_dir: Option<PathBuf>,
    /// Default level when `RUST_LOG` is unset
    pub level: Level,
    /// Colored console output
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "studentsrv".to_string(),
            log_dir: Some(PathBuf::from("logs")),
            level: Level::INFO,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> String {
        format!(
            "{},{}=debug,{}=info",
            self.level.as_str().to_lowercase(),
            self.service_name,
            API_ACCESS_TARGET
        )
    }
}

/// Initialize the global subscriber
///
/// Returns an error if a subscriber is already installed.
pub fn init_with_config(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(env_str) if !env_str.trim().is_empty() => EnvFilter::new(env_str),
        _ => EnvFilter::new(config.default_directive()),
    };

    let console_layer = fmt::layer()
        .with_ansi(config.ansi)
        .event_format(BracketedLevelFormat)
        .boxed();

    let (business_file_layer, api_file_layer) = match &config.log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;

            let business_appender =
                tracing_appender::rolling::daily(dir, format!("{}.log", config.service_name));
            let (business_writer, business_guard) =
                tracing_appender::non_blocking(business_appender);

            let api_appender =
                tracing_appender::rolling::daily(dir, format!("{}_api.log", config.service_name));
            let (api_writer, api_guard) = tracing_appender::non_blocking(api_appender);

            let guards = GUARDS.get_or_init(|| Mutex::new(Vec::new()));
            match guards.lock() {
                Ok(mut guards) => guards.extend([business_guard, api_guard]),
                Err(poisoned) => poisoned
                    .into_inner()
                    .extend([business_guard, api_guard]),
            }

            let business = fmt::layer()
                .with_writer(business_writer)
                .with_ansi(false)
                .event_format(BracketedLevelFormat)
                .with_filter(filter::filter_fn(|metadata| {
                    metadata.target() != API_ACCESS_TARGET
                }))
                .boxed();
            let api = fmt::layer()
                .with_writer(api_writer)
                .with_ansi(false)
                .event_format(BracketedLevelFormat)
                .with_filter(filter::filter_fn(|metadata| {
                    metadata.target() == API_ACCESS_TARGET
                }))
                .boxed();
            (Some(business), Some(api))
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(business_file_layer)
        .with(api_file_layer)
        .try_init()?;

    match &config.log_dir {
        Some(dir) => tracing::info!("Logging: {} @ {:?}", config.service_name, dir),
        None => tracing::info!("Logging: {} (console only)", config.service_name),
    }

    Ok(())
}

/// Parse a level name, falling back to INFO
pub fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Keys whose values never reach the access log
const REDACTED_KEYS: &[&str] = &[
    "first_name",
    "last_name",
    "email",
    "address",
    "city",
    "password",
    "token",
];

/// Mask student personal data in a JSON request body
///
/// Non-JSON input is returned unchanged.
fn redact_sensitive_fields(body: &str) -> String {
    use serde_json::Value;

    fn mask(value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, val) in map.iter_mut() {
                    let key = key.to_ascii_lowercase();
                    if REDACTED_KEYS.iter().any(|k| key.contains(k)) {
                        *val = Value::String("***".to_string());
                    } else {
                        mask(val);
                    }
                }
            },
            Value::Array(items) => items.iter_mut().for_each(mask),
            _ => {},
        }
    }

    match serde_json::from_str::<Value>(body) {
        Ok(mut value) => {
            mask(&mut value);
            value.to_string()
        },
        Err(_) => body.to_string(),
    }
}

fn truncate_body(body: &str, max_length: usize) -> String {
    if body.len() <= max_length {
        return body.to_string();
    }
    let mut cut = max_length;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}[truncated {} bytes]", &body[..cut], body.len() - cut)
}

/// HTTP access logger middleware
///
/// - Writes (POST/PUT/PATCH/DELETE) are logged at INFO without body
/// - Every request is logged at DEBUG; JSON write bodies are included,
///   truncated to 500 bytes with personal fields redacted
///
/// Add it before `.with_state()`:
/// ```rust,ignore
/// let app = Router::new()
///     // ... routes ...
///     .layer(axum::middleware::from_fn(common::logging::http_request_logger))
///     .with_state(state);
/// ```
#[cfg(feature = "axum")]
pub async fn http_request_logger(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    use axum::body::Body;
    use std::time::Instant;
    use tracing::{debug, info, level_enabled};

    const MAX_BODY_LENGTH: usize = 500;

    let method = req.method().clone();
    let uri = req.uri().clone();
    let is_write = matches!(method.as_str(), "POST" | "PUT" | "PATCH" | "DELETE");
    let is_json = req
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    let start = Instant::now();

    let (req, body_str) = if level_enabled!(Level::DEBUG) && is_write && is_json {
        let (parts, body) = req.into_parts();
        let bytes = match axum::body::to_bytes(body, usize::MAX).await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("Failed to read request body: {}", e);
                let new_req = axum::extract::Request::from_parts(parts, Body::empty());
                return next.run(new_req).await;
            },
        };
        let body_str = match std::str::from_utf8(&bytes) {
            Ok(s) => truncate_body(&redact_sensitive_fields(s), MAX_BODY_LENGTH),
            Err(_) => "<binary data>".to_string(),
        };
        (
            axum::extract::Request::from_parts(parts, Body::from(bytes)),
            Some(body_str),
        )
    } else {
        (req, None)
    };

    let response = next.run(req).await;
    let duration_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    if is_write {
        info!(
            target: "api_access",
            method = %method,
            path = %uri.path(),
            status,
            duration_ms = %duration_ms,
            "HTTP request"
        );
    }

    match body_str {
        Some(body) => debug!(
            target: "api_access",
            method = %method,
            path = %uri.path(),
            status,
            duration_ms = %duration_ms,
            request_body = %body,
            "HTTP request (detailed)"
        ),
        None if !is_write => debug!(
            target: "api_access",
            method = %method,
            path = %uri.path(),
            status,
            duration_ms = %duration_ms,
            "HTTP request"
        ),
        None => {},
    }

    response
}
