//! Attempt loop for a single product fetch.
//!
//! Transport failures and non-2xx statuses are retried with a linear
//! backoff (`base × failures`) up to the policy's attempt budget. A 2xx body
//! carrying an anti-bot challenge triggers one extra attempt after a random
//! cooldown; that extra attempt does not consume the failure budget.
//!
//! Challenge markers are `captcha` anywhere and `robot` as a whole word.
//! `<script src>` tags that merely load a captcha widget (reCAPTCHA on a
//! review or login form) are ignored, so ordinary product pages are not
//! fetched twice.

use std::future::Future;
use std::sync::LazyLock;

use regex::Regex;

use super::identity::{RequestHeaders, RequestProfile};
use super::{FetchPolicy, FetchedPage};
use crate::error::ScraperError;

static CHALLENGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)captcha|\brobot\b").expect("challenge marker regex is valid")
});

static CAPTCHA_SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script\b[^>]*\bsrc\s*=\s*["'][^"']*captcha[^"']*["'][^>]*>"#)
        .expect("captcha script tag regex is valid")
});

/// Returns `true` when a successful response body looks like a bot check.
pub(crate) fn looks_like_challenge(body: &str) -> bool {
    let without_widget_loaders = CAPTCHA_SCRIPT_TAG.replace_all(body, "");
    CHALLENGE_MARKER.is_match(&without_widget_loaders)
}

/// Runs `send` until it yields a usable page or the policy gives up.
///
/// `send` receives a freshly built [`RequestProfile`] for every attempt, with
/// the user agent rotated each time.
pub(crate) async fn fetch_with_retries<F, Fut>(
    policy: &FetchPolicy,
    headers: &RequestHeaders,
    url: &str,
    mut send: F,
) -> Result<FetchedPage, ScraperError>
where
    F: FnMut(RequestProfile) -> Fut,
    Fut: Future<Output = Result<FetchedPage, ScraperError>>,
{
    let mut rotation = headers.rotation();
    let mut failures = 0u32;
    let mut challenge_retried = false;

    loop {
        tokio::time::sleep(policy.pacing.sample()).await;
        let profile = headers.profile(url, rotation.next_agent());

        match send(profile).await {
            Ok(page) => {
                if challenge_retried || !looks_like_challenge(&page.body) {
                    return Ok(page);
                }
                challenge_retried = true;
                let cooldown = policy.challenge_cooldown.sample();
                tracing::warn!(
                    url,
                    cooldown_ms = u64::try_from(cooldown.as_millis()).unwrap_or(u64::MAX),
                    "anti-bot challenge detected; retrying once with a new identity"
                );
                tokio::time::sleep(cooldown).await;
            }
            Err(err) => {
                if !err.is_retriable() {
                    return Err(err);
                }
                failures += 1;
                if failures >= policy.max_attempts {
                    return Err(ScraperError::Exhausted {
                        url: url.to_owned(),
                        attempts: failures,
                        source: Box::new(err),
                    });
                }
                let delay = policy.backoff_delay(failures);
                tracing::warn!(
                    url,
                    attempt = failures,
                    max_attempts = policy.max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "fetch attempt failed; backing off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod tests;
