//! Startup configuration read from the environment.

use crate::error::ServerError;
use crate::store::IdStrategy;

pub const DEFAULT_PORT: u16 = 4000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub id_strategy: IdStrategy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            id_strategy: IdStrategy::default(),
        }
    }
}

impl ServerConfig {
    /// Reads `PORT` and `TODO_ID_STRATEGY`. Unset variables keep defaults.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let mut config = Self::default();
        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|_| ServerError::InvalidPort(port))?;
        }
        if let Some(strategy) = lookup("TODO_ID_STRATEGY") {
            config.id_strategy = strategy.parse()?;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
    }

    #[test]
    fn reads_port_and_strategy() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8081"),
            ("TODO_ID_STRATEGY", "length-plus-one"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.id_strategy, IdStrategy::LengthPlusOne);
    }

    #[test]
    fn rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ServerError::InvalidPort(p) if p == "http"));
    }

    #[test]
    fn rejects_unknown_id_strategy() {
        let err = ServerConfig::from_lookup(lookup(&[("TODO_ID_STRATEGY", "random")])).unwrap_err();
        assert!(matches!(err, ServerError::InvalidIdStrategy(s) if s == "random"));
    }
}
