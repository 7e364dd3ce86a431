use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where and how the service emits its `tracing` events.
///
/// Console output is always on. Events are also shipped to Loki when the `loki`
/// feature is compiled in and `LOKI_ENABLED` is set.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_enabled: bool,
    pub loki_url: Option<String>,
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            loki_enabled: get("LOKI_ENABLED")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            loki_url: get("LOKI_URL").filter(|url| !url.trim().is_empty()),
            service_name: get("SERVICE_NAME").unwrap_or_else(|| "carteira".to_string()),
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            log_level: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.loki_enabled && self.loki_url.is_none() {
            return Err("LOKI_ENABLED is true but LOKI_URL is not set".to_string());
        }
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| format!("Invalid RUST_LOG '{}': {}", self.log_level, e))?;
        Ok(())
    }
}

pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level)?)
        .with(fmt::layer());

    #[cfg(feature = "loki")]
    subscriber.with(loki_layer(&config)?).try_init()?;
    #[cfg(not(feature = "loki"))]
    subscriber.try_init()?;

    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        loki = config.loki_enabled,
        "Logging initialized"
    );
    Ok(())
}

// None unless Loki shipping is switched on.
#[cfg(feature = "loki")]
fn loki_layer(config: &LoggingConfig) -> Result<Option<tracing_loki::Layer>, Box<dyn std::error::Error>> {
    let Some(loki_url) = config.loki_url.as_deref().filter(|_| config.loki_enabled) else {
        return Ok(None);
    };

    let (layer, task) = tracing_loki::builder()
        .label("service", config.service_name.as_str())?
        .label("environment", config.environment.as_str())?
        .build_url(url::Url::parse(loki_url)?)?;
    tokio::spawn(task);

    Ok(Some(layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> LoggingConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LoggingConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_console_at_info() {
        let config = load(&[]);
        assert!(!config.loki_enabled);
        assert_eq!(config.service_name, "carteira");
        assert_eq!(config.environment, "development");
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loki_needs_url() {
        assert!(load(&[("LOKI_ENABLED", "true")]).validate().is_err());
        assert!(load(&[("LOKI_ENABLED", "true"), ("LOKI_URL", " ")]).validate().is_err());
        let enabled = load(&[("LOKI_ENABLED", "true"), ("LOKI_URL", "http://localhost:3100")]);
        assert!(enabled.validate().is_ok());
    }

    #[test]
    fn unparsable_flag_disables_loki() {
        assert!(!load(&[("LOKI_ENABLED", "yes")]).loki_enabled);
    }

    #[test]
    fn rejects_bad_filter() {
        assert!(load(&[("RUST_LOG", "carteira=loud")]).validate().is_err());
        assert!(load(&[("RUST_LOG", "carteira_backend=debug,sqlx=warn")]).validate().is_ok());
    }
}
