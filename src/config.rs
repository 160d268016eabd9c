use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub max_body_size: usize,
    pub autoclose: AutocloseConfig,
    pub limits: Limits,
}

#[derive(Debug, Clone)]
pub struct AutocloseConfig {
    pub enabled: bool,
    pub interval: Duration,
}

/// Cardinality caps enforced by the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_projects: usize,
    pub max_tasks_per_project: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_projects: 10,
            max_tasks_per_project: 50,
        }
    }
}

impl Limits {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Limits::default();

        let max_projects: usize =
            env_or("MAX_NUMBER_OF_PROJECTS", &defaults.max_projects.to_string())
                .parse()
                .map_err(|e| format!("Invalid MAX_NUMBER_OF_PROJECTS: {e}"))?;

        let max_tasks_per_project: usize = env_or(
            "MAX_NUMBER_OF_TASKS_PER_PROJECT",
            &defaults.max_tasks_per_project.to_string(),
        )
        .parse()
        .map_err(|e| format!("Invalid MAX_NUMBER_OF_TASKS_PER_PROJECT: {e}"))?;

        Ok(Limits {
            max_projects,
            max_tasks_per_project,
        })
    }
}

impl AutocloseConfig {
    pub fn from_env() -> Result<Self, String> {
        let enabled = parse_bool(
            "TODO_AUTOCLOSE_ENABLED",
            &env_or("TODO_AUTOCLOSE_ENABLED", "true"),
        )?;

        let interval_secs: u64 = env_or("TODO_AUTOCLOSE_INTERVAL_SECS", "600")
            .parse()
            .map_err(|e| format!("Invalid TODO_AUTOCLOSE_INTERVAL_SECS: {e}"))?;
        if interval_secs == 0 {
            return Err("TODO_AUTOCLOSE_INTERVAL_SECS must be greater than zero".to_string());
        }

        Ok(AutocloseConfig {
            enabled,
            interval: Duration::from_secs(interval_secs),
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("TODO_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid TODO_HOST: {e}"))?;

        let port: u16 = env_or("TODO_PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid TODO_PORT: {e}"))?;

        let log_level = env_or("TODO_LOG_LEVEL", "info");

        let max_body_size: usize = env_or("TODO_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid TODO_MAX_BODY_SIZE: {e}"))?;

        Ok(Config {
            database_url,
            host,
            port,
            log_level,
            max_body_size,
            autoclose: AutocloseConfig::from_env()?,
            limits: Limits::from_env()?,
        })
    }
}

pub fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("Invalid {key}: expected a boolean, got '{other}'")),
    }
}
