//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;
use crate::permissions::Platform;

/// Onboarding core configuration.
#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// How often the permission poller refreshes every permission kind.
    pub poll_interval: Duration,
    /// Which platform's permission identifiers to probe.
    pub platform: Platform,
    /// Base URL of the remote account service.
    pub api_base_url: String,
    /// Timeout applied to each driver fetch.
    pub request_timeout: Duration,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            platform: Platform::Android,
            api_base_url: "http://localhost:3000/api".to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl OnboardingConfig {
    /// Build a config from `DRIVER_*` environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("DRIVER_PERMISSION_POLL_SECS") {
            let secs = parse_secs("DRIVER_PERMISSION_POLL_SECS", &raw)?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "DRIVER_PERMISSION_POLL_SECS".to_string(),
                    message: "poll interval must be greater than zero".to_string(),
                });
            }
            config.poll_interval = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("DRIVER_PLATFORM") {
            config.platform = raw.parse().map_err(|message| ConfigError::InvalidValue {
                key: "DRIVER_PLATFORM".to_string(),
                message,
            })?;
        }

        if let Some(url) = lookup("DRIVER_API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("DRIVER_API_TIMEOUT_SECS") {
            config.request_timeout =
                Duration::from_secs(parse_secs("DRIVER_API_TIMEOUT_SECS", &raw)?);
        }

        Ok(config)
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{e}"),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_poll_every_ten_seconds() {
        let config = OnboardingConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.platform, Platform::Android);
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = OnboardingConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
    }

    #[test]
    fn overrides_are_applied() {
        let config = OnboardingConfig::from_lookup(lookup_from(&[
            ("DRIVER_PERMISSION_POLL_SECS", "30"),
            ("DRIVER_PLATFORM", "ios"),
            ("DRIVER_API_BASE_URL", "https://api.example.com/v2/"),
            ("DRIVER_API_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.platform, Platform::Ios);
        assert_eq!(config.api_base_url, "https://api.example.com/v2");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_poll_interval_rejected() {
        let err = OnboardingConfig::from_lookup(lookup_from(&[(
            "DRIVER_PERMISSION_POLL_SECS",
            "0",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "DRIVER_PERMISSION_POLL_SECS"));
    }

    #[test]
    fn unknown_platform_rejected() {
        let err =
            OnboardingConfig::from_lookup(lookup_from(&[("DRIVER_PLATFORM", "windows")])).unwrap_err();
        assert!(err.to_string().contains("DRIVER_PLATFORM"));
    }

    #[test]
    fn non_numeric_timeout_rejected() {
        let err = OnboardingConfig::from_lookup(lookup_from(&[(
            "DRIVER_API_TIMEOUT_SECS",
            "soon",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
