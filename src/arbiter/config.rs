// SPDX-License-Identifier: MIT

//! Process configuration read from the environment (and `.env`)

use crate::arbiter::tree::validator::DEFAULT_MAX_REPEAT_COUNT;
use crate::engine::error::{ArbiterError, Result};
use std::collections::HashMap;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_EVALUATION_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Upper bound accepted for `repeatCount`
    pub max_repeat_count: u32,
    /// Deadline for a single tree evaluation
    pub evaluation_timeout: Duration,
    /// Deliver send-message actions to this webhook instead of the log
    pub sms_webhook_url: Option<Url>,
    /// Deliver send-email actions to this webhook instead of the log
    pub email_webhook_url: Option<Url>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
            max_repeat_count: DEFAULT_MAX_REPEAT_COUNT,
            evaluation_timeout: Duration::from_secs(DEFAULT_EVALUATION_TIMEOUT_SECS),
            sms_webhook_url: None,
            email_webhook_url: None,
        }
    }
}

impl Config {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Read configuration from an explicit variable map
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        let defaults = Self::default();
        let timeout_secs = parse_var(&vars, "ARBITER_EVALUATION_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_EVALUATION_TIMEOUT_SECS);

        Ok(Self {
            bind_addr: parse_var(&vars, "ARBITER_BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            port: parse_var(&vars, "PORT")?.unwrap_or(defaults.port),
            max_repeat_count: parse_var(&vars, "ARBITER_MAX_REPEAT_COUNT")?
                .unwrap_or(defaults.max_repeat_count),
            evaluation_timeout: Duration::from_secs(timeout_secs),
            sms_webhook_url: parse_url(&vars, "ARBITER_SMS_WEBHOOK_URL")?,
            email_webhook_url: parse_url(&vars, "ARBITER_EMAIL_WEBHOOK_URL")?,
        })
    }
}

fn get<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_var<T>(vars: &HashMap<String, String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(vars, key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| ArbiterError::config(format!("invalid {} '{}': {}", key, raw, e)))
        })
        .transpose()
}

fn parse_url(vars: &HashMap<String, String>, key: &str) -> Result<Option<Url>> {
    let url: Option<Url> = parse_var(vars, key)?;
    match url {
        Some(url) if !matches!(url.scheme(), "http" | "https") => Err(ArbiterError::config(
            format!("{} must be an http(s) URL, got '{}'", key, url),
        )),
        other => Ok(other),
    }
}
