use std::net::IpAddr;
use std::path::PathBuf;

/// Origins of the bundled client during development.
pub const DEFAULT_CORS_ORIGINS: &str =
    "https://localhost:52408,https://localhost:7082,http://localhost:52408,http://localhost:7082";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub cors_origins: Vec<String>,
    pub static_dir: Option<PathBuf>,
    pub seed_demo: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_optional("DATABASE_URL");

        let host: IpAddr = env_or("FORMS_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FORMS_HOST: {e}"))?;

        let port: u16 = env_or("FORMS_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid FORMS_PORT: {e}"))?;

        let max_body_size: usize = env_or("FORMS_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid FORMS_MAX_BODY_SIZE: {e}"))?;

        let cors_origins = parse_origins(&env_or("FORMS_CORS_ORIGINS", DEFAULT_CORS_ORIGINS))?;

        let static_dir = env_optional("FORMS_STATIC_DIR").map(PathBuf::from);

        let seed_demo = parse_bool("FORMS_SEED_DEMO", &env_or("FORMS_SEED_DEMO", "false"))?;

        let log_level = env_or("FORMS_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            max_body_size,
            cors_origins,
            static_dir,
            seed_demo,
            log_level,
        })
    }
}

fn parse_origins(raw: &str) -> Result<Vec<String>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s == "*" {
                Err("Invalid FORMS_CORS_ORIGINS entry '*': credentials require explicit origins".to_string())
            } else if s.starts_with("http://") || s.starts_with("https://") {
                Ok(s.trim_end_matches('/').to_string())
            } else {
                Err(format!("Invalid FORMS_CORS_ORIGINS entry '{s}': expected http(s) origin"))
            }
        })
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(format!("Invalid {key}: '{other}' is not a boolean")),
    }
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
