//! Metrics exporter settings

use serde::Deserialize;

use crate::domain::DomainError;

/// Prometheus exporter settings; the scrape route is mounted at `path`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// The scrape path must be an absolute route that does not shadow the game API
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.enabled {
            return Ok(());
        }

        if !self.path.starts_with('/') || self.path.len() < 2 {
            return Err(DomainError::configuration(format!(
                "metrics.path '{}' must be an absolute route",
                self.path
            )));
        }

        const RESERVED: [&str; 6] = ["/auth", "/team", "/players", "/market", "/health", "/ready"];
        if RESERVED
            .iter()
            .any(|prefix| self.path == *prefix || self.path.starts_with(&format!("{prefix}/")))
        {
            return Err(DomainError::configuration(format!(
                "metrics.path '{}' collides with an API route",
                self.path
            )));
        }

        Ok(())
    }
}
