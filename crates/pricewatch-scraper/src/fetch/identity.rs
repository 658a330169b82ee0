//! Per-attempt request identity: rotated user agent plus the base headers.

use pricewatch_core::{AppConfig, DEFAULT_USER_AGENTS};
use rand::Rng;

use super::origin::extract_origin;

const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Base header set supplied at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    user_agents: Vec<String>,
    pub accept: String,
    pub accept_language: String,
    pub accept_encoding: String,
}

impl RequestHeaders {
    /// An empty user-agent pool is replaced by the built-in one.
    #[must_use]
    pub fn new(user_agents: Vec<String>, accept_language: &str, accept_encoding: &str) -> Self {
        let user_agents = if user_agents.is_empty() {
            default_pool()
        } else {
            user_agents
        };
        Self {
            user_agents,
            accept: DEFAULT_ACCEPT.to_owned(),
            accept_language: accept_language.to_owned(),
            accept_encoding: accept_encoding.to_owned(),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(
            config.user_agents.clone(),
            &config.accept_language,
            &config.accept_encoding,
        )
    }

    #[must_use]
    pub fn user_agents(&self) -> &[String] {
        &self.user_agents
    }

    /// Starts a rotation at a random position in the pool.
    pub(crate) fn rotation(&self) -> UserAgentRotation<'_> {
        let start = rand::rng().random_range(0..self.user_agents.len());
        UserAgentRotation {
            pool: &self.user_agents,
            next: start,
        }
    }

    pub(crate) fn profile(&self, url: &str, user_agent: &str) -> RequestProfile {
        RequestProfile {
            user_agent: user_agent.to_owned(),
            referer: extract_origin(url),
            accept: self.accept.clone(),
            accept_language: self.accept_language.clone(),
            accept_encoding: self.accept_encoding.clone(),
        }
    }
}

impl Default for RequestHeaders {
    fn default() -> Self {
        Self::new(
            default_pool(),
            "tr-TR,tr;q=0.9,en-US;q=0.8,en;q=0.7",
            "gzip, deflate, br",
        )
    }
}

fn default_pool() -> Vec<String> {
    DEFAULT_USER_AGENTS.iter().map(|ua| (*ua).to_owned()).collect()
}

/// Headers for exactly one attempt. Built fresh each time and never stored
/// on the shared client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestProfile {
    pub user_agent: String,
    pub referer: String,
    pub accept: String,
    pub accept_language: String,
    pub accept_encoding: String,
}

/// Walks the pool round-robin, so consecutive attempts differ whenever the
/// pool holds more than one agent.
pub(crate) struct UserAgentRotation<'a> {
    pool: &'a [String],
    next: usize,
}

impl<'a> UserAgentRotation<'a> {
    pub(crate) fn next_agent(&mut self) -> &'a str {
        let agent = &self.pool[self.next % self.pool.len()];
        self.next = self.next.wrapping_add(1);
        agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pool_falls_back_to_defaults() {
        let headers = RequestHeaders::new(Vec::new(), "en-US", "gzip");
        assert_eq!(headers.user_agents().len(), DEFAULT_USER_AGENTS.len());
    }

    #[test]
    fn rotation_never_repeats_consecutively() {
        let headers = RequestHeaders::new(
            vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
            "en-US",
            "gzip",
        );
        let mut rotation = headers.rotation();
        let agents: Vec<&str> = (0..7).map(|_| rotation.next_agent()).collect();
        for pair in agents.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn single_agent_pool_repeats() {
        let headers = RequestHeaders::new(vec!["only".to_owned()], "en-US", "gzip");
        let mut rotation = headers.rotation();
        assert_eq!(rotation.next_agent(), "only");
        assert_eq!(rotation.next_agent(), "only");
    }

    #[test]
    fn profile_sets_referer_to_origin() {
        let headers = RequestHeaders::default();
        let profile = headers.profile("https://www.n11.com/urun/kilif-123", "ua");
        assert_eq!(profile.referer, "https://www.n11.com");
        assert_eq!(profile.user_agent, "ua");
        assert!(profile.accept_language.starts_with("tr-TR"));
    }
}
