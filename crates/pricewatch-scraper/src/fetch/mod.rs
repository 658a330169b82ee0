//! Resilient HTTP fetcher for product pages.
//!
//! Every call paces itself with a random delay, rotates the user agent on
//! each attempt, retries transport failures with a linear backoff and
//! re-issues a request once when the response looks like a bot challenge.

mod identity;
mod origin;
mod retry;

use std::time::Duration;

use pricewatch_core::AppConfig;
use rand::Rng;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;

use crate::error::ScraperError;

pub use identity::{RequestHeaders, RequestProfile};
pub use origin::extract_origin;

/// Inclusive millisecond range a random delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    #[must_use]
    pub fn fixed_ms(ms: u64) -> Self {
        Self::new(ms, ms)
    }

    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }
}

/// Timing and retry knobs for [`Fetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Transport failures tolerated before giving up. Always at least 1.
    pub max_attempts: u32,
    /// Wait before attempt `n + 1` is `backoff_base × n`.
    pub backoff_base: Duration,
    /// Random pause before the attempt sequence and before each attempt.
    pub pacing: DelayRange,
    /// Random pause before re-issuing a challenged request.
    pub challenge_cooldown: DelayRange,
    pub request_timeout: Duration,
}

impl FetchPolicy {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff_base: Duration::from_millis(config.backoff_base_ms),
            pacing: DelayRange::new(config.pacing_min_ms, config.pacing_max_ms),
            challenge_cooldown: DelayRange::new(
                config.challenge_cooldown_min_ms,
                config.challenge_cooldown_max_ms,
            ),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Same retry budget with every pause set to zero.
    #[must_use]
    pub fn without_delays(self) -> Self {
        Self {
            backoff_base: Duration::ZERO,
            pacing: DelayRange::fixed_ms(0),
            challenge_cooldown: DelayRange::fixed_ms(0),
            ..self
        }
    }

    #[must_use]
    pub fn backoff_delay(&self, failures: u32) -> Duration {
        self.backoff_base.saturating_mul(failures)
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(2),
            pacing: DelayRange::new(500, 2_000),
            challenge_cooldown: DelayRange::new(3_000, 6_000),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub body: String,
    /// URL after redirects.
    pub final_url: String,
}

/// HTTP client for product pages.
///
/// The client itself carries no identity headers; each attempt sends its own
/// [`RequestProfile`], so concurrent fetches on one `Fetcher` never observe
/// each other's user agent.
pub struct Fetcher {
    client: Client,
    headers: RequestHeaders,
    policy: FetchPolicy,
}

impl Fetcher {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(headers: RequestHeaders, policy: FetchPolicy) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(policy.request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            headers,
            policy,
        })
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            RequestHeaders::from_app_config(config),
            FetchPolicy::from_app_config(config),
        )
    }

    #[must_use]
    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Fetches `url`, retrying per the configured [`FetchPolicy`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `url` is not an absolute http(s) URL;
    ///   no request is sent.
    /// - [`ScraperError::Exhausted`] once the attempt budget is spent on
    ///   transport failures or non-2xx statuses.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        validate_url(url)?;

        tokio::time::sleep(self.policy.pacing.sample()).await;
        let page = retry::fetch_with_retries(&self.policy, &self.headers, url, |profile| {
            self.send_once(url, profile)
        })
        .await?;

        tracing::debug!(
            url,
            final_url = %page.final_url,
            bytes = page.body.len(),
            "page fetched"
        );
        Ok(page)
    }

    async fn send_once(
        &self,
        url: &str,
        profile: RequestProfile,
    ) -> Result<FetchedPage, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, profile.user_agent)
            .header(REFERER, profile.referer)
            .header(ACCEPT, profile.accept)
            .header(ACCEPT_LANGUAGE, profile.accept_language)
            .header(ACCEPT_ENCODING, profile.accept_encoding)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;
        Ok(FetchedPage { body, final_url })
    }
}

fn validate_url(url: &str) -> Result<(), ScraperError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: format!("unsupported scheme \"{other}\""),
        }),
    }
}
