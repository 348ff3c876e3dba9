//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas tienen valor por defecto salvo `DATABASE_URL`, que es opcional: sin
//! ella el servicio usa el almacén en memoria.

use std::env;

use anyhow::{anyhow, Context, Result};

/// Configuración del entorno
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub database_url: Option<String>,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            database_url: None,
            log_level: tracing::Level::INFO,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir a partir de cualquier fuente clave/valor
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid number, got '{}'", raw))?,
            None => defaults.port,
        };

        let log_level = match non_empty("LOG_LEVEL") {
            Some(raw) => raw
                .parse::<tracing::Level>()
                .map_err(|_| anyhow!("LOG_LEVEL must be one of trace/debug/info/warn/error, got '{}'", raw))?,
            None => defaults.log_level,
        };

        let cors_origins = non_empty("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            environment: non_empty("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: non_empty("HOST").unwrap_or(defaults.host),
            cors_origins,
            database_url: non_empty("DATABASE_URL"),
            log_level,
        })
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = EnvironmentConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EnvironmentConfig::default());
        assert_eq!(config.environment, "development");
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_all_values() {
        let config = EnvironmentConfig::from_lookup(lookup(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("CORS_ORIGINS", "http://localhost:5173, https://lava.example.com,"),
            ("DATABASE_URL", "postgres://user:pass@db/lava"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.environment, "production");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.database_url.as_deref(), Some("postgres://user:pass@db/lava"));
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(EnvironmentConfig::from_lookup(lookup(&[("PORT", "http")])).is_err());
        assert!(EnvironmentConfig::from_lookup(lookup(&[("LOG_LEVEL", "loud")])).is_err());
    }

    #[test]
    fn test_blank_database_url_means_in_memory() {
        let config = EnvironmentConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert!(config.database_url.is_none());
    }
}
