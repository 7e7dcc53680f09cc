use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::clients::AccountSettings;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {var} value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    pub channel_buffer: usize,
    pub auth_delay: Duration,
    pub profile_delay: Duration,
    pub payment_delay: Duration,
    pub redirect_delay: Duration,
    pub demo_password: String,
    /// Default log filter; `RUST_LOG` still wins when set.
    pub log_filter: String,
    pub seed_fixtures: bool,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            auth_delay: Duration::from_millis(1500),
            profile_delay: Duration::from_millis(1000),
            payment_delay: Duration::from_millis(2000),
            redirect_delay: Duration::from_millis(3000),
            demo_password: "demo123".to_string(),
            log_filter: "info".to_string(),
            seed_fixtures: true,
        }
    }
}

impl MarketConfig {
    /// Loads `.env` if present, then reads the `MANDI_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as the defaults but with every simulated delay removed.
    pub fn instant() -> Self {
        Self {
            auth_delay: Duration::ZERO,
            profile_delay: Duration::ZERO,
            payment_delay: Duration::ZERO,
            redirect_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let millis = |var: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            parse_var(&lookup, var, default.as_millis() as u64).map(Duration::from_millis)
        };

        let config = Self {
            channel_buffer: parse_var(&lookup, "MANDI_CHANNEL_BUFFER", defaults.channel_buffer)?,
            auth_delay: millis("MANDI_AUTH_DELAY_MS", defaults.auth_delay)?,
            profile_delay: millis("MANDI_PROFILE_DELAY_MS", defaults.profile_delay)?,
            payment_delay: millis("MANDI_PAYMENT_DELAY_MS", defaults.payment_delay)?,
            redirect_delay: millis("MANDI_REDIRECT_DELAY_MS", defaults.redirect_delay)?,
            demo_password: lookup("MANDI_DEMO_PASSWORD").unwrap_or(defaults.demo_password),
            log_filter: lookup("MANDI_LOG").unwrap_or(defaults.log_filter),
            seed_fixtures: parse_var(&lookup, "MANDI_SEED_FIXTURES", defaults.seed_fixtures)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but cannot be used. Actor mailboxes need room
    /// for at least one request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid {
                var: "MANDI_CHANNEL_BUFFER",
                value: self.channel_buffer.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn account_settings(&self) -> AccountSettings {
        AccountSettings {
            auth_delay: self.auth_delay,
            profile_delay: self.profile_delay,
            demo_password: self.demo_password.clone(),
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
