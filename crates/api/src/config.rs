use std::fmt::Display;
use std::str::FromStr;

/// Server configuration loaded from environment variables.
///
/// Every field has a local-development default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Primary backend base URL, including the `/api/v1` prefix.
    pub backend_url: String,
    /// OCR service base URL, including the `/api/v1` prefix.
    pub ocr_url: String,
    /// Timeout of every upstream call in seconds (default: `60`).
    pub upstream_timeout_secs: u64,
    /// Largest accepted request body (default: 25 MiB).
    pub max_body_bytes: usize,
    /// Mark session cookies `Secure` (default: `false`).
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                          |
    /// |-------------------------|----------------------------------|
    /// | `HOST`                  | `0.0.0.0`                        |
    /// | `PORT`                  | `3000`                           |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`          |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                             |
    /// | `BACKEND_URL`           | `http://localhost:9000/api/v1`   |
    /// | `OCR_URL`               | `http://localhost:8001/api/v1`   |
    /// | `UPSTREAM_TIMEOUT_SECS` | `60`                             |
    /// | `MAX_BODY_BYTES`        | `26214400`                       |
    /// | `COOKIE_SECURE`         | `false`                          |
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 3000),
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            backend_url: env_or("BACKEND_URL", "http://localhost:9000/api/v1"),
            ocr_url: env_or("OCR_URL", "http://localhost:8001/api/v1"),
            upstream_timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", 60),
            max_body_bytes: parse_env("MAX_BODY_BYTES", 25 * 1024 * 1024),
            cookie_secure: parse_env("COOKIE_SECURE", false),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse `key` when set. Panics on an unparsable value so a typo fails at
/// startup.
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
