use std::env;

use crate::error::AppError;

/// Runtime environment, selected with `RUNTIME_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeEnv {
    /// Production: auth cookies carry the `Secure` attribute
    #[default]
    Prod,
    /// Local development over plain HTTP
    Dev,
}

impl RuntimeEnv {
    pub fn secure_cookies(self) -> bool {
        matches!(self, RuntimeEnv::Prod)
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub runtime_env: RuntimeEnv,
}

impl ServerConfig {
    /// Read `BACKEND_HOST`, `BACKEND_PORT` and `RUNTIME_ENV`.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_port(env::var("BACKEND_PORT").ok().as_deref())?;
        let runtime_env = parse_runtime_env(env::var("RUNTIME_ENV").ok().as_deref())?;

        Ok(Self {
            host,
            port,
            runtime_env,
        })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, AppError> {
    match raw {
        None => Ok(3001),
        Some(value) => value.trim().parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{value}'"
            ))
        }),
    }
}

fn parse_runtime_env(raw: Option<&str>) -> Result<RuntimeEnv, AppError> {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("prod") | Some("production") => Ok(RuntimeEnv::Prod),
        Some("dev") | Some("development") => Ok(RuntimeEnv::Dev),
        Some(other) => Err(AppError::config(format!(
            "RUNTIME_ENV must be 'prod' or 'dev', got '{other}'"
        ))),
    }
}
