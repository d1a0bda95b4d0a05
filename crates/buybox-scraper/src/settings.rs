//! Resolver settings derived from the host's [`AppConfig`].

use std::time::Duration;

use buybox_core::{AppConfig, ProductId};

use crate::backoff::RetryPolicy;
use crate::error::ScraperError;

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Marketplace origin, without trailing slash.
    pub base_url: String,
    /// Value of the `language` query parameter.
    pub locale: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub max_workers: usize,
    pub retries_per_cycle: u32,
    pub max_blocked_cycles: u32,
    pub retry_policy: RetryPolicy,
}

impl ResolverConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.marketplace_base_url.trim_end_matches('/').to_owned(),
            locale: config.locale.clone(),
            user_agent: config.user_agent.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            max_workers: config.max_workers,
            retries_per_cycle: config.retries_per_cycle,
            max_blocked_cycles: config.max_blocked_cycles,
            retry_policy: RetryPolicy {
                backoff_base: config.blocked_backoff_base,
                ..RetryPolicy::default()
            },
        }
    }

    /// Product detail page URL: `{base}/dp/{id}?language={locale}`.
    #[must_use]
    pub fn product_url(&self, id: &ProductId) -> String {
        format!(
            "{}/dp/{}?language={}",
            self.base_url.trim_end_matches('/'),
            id,
            self.locale
        )
    }

    /// Checks that the base URL is an absolute http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] otherwise.
    pub fn validate(&self) -> Result<(), ScraperError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidBaseUrl {
                base_url: self.base_url.clone(),
                reason: format!("unsupported scheme \"{}\"", url.scheme()),
            });
        }
        Ok(())
    }
}
