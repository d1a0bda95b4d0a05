//! Per-worker HTTP sessions.
//!
//! Each worker owns one [`SessionProvider`]. The provider lazily builds a
//! `reqwest::Client` carrying browser-like default headers and its own cookie
//! jar. Forcing renewal drops the old client, cookies included, and builds a
//! fresh one; no other worker's session is touched.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use reqwest::Client;

use crate::error::ScraperError;

pub(crate) const ACCEPT_LANGUAGE_VALUE: &str = "pt-BR,pt;q=0.9,en;q=0.7";
pub(crate) const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// One HTTP client context. Cookies set by the marketplace accumulate here
/// until the session is renewed.
#[derive(Debug)]
pub struct Session {
    client: Client,
    generation: u64,
}

impl Session {
    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// 1 for the first session a provider built, incremented per renewal.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns at most one live [`Session`] for a single worker.
#[derive(Debug)]
pub struct SessionProvider {
    worker: usize,
    user_agent: String,
    current: Option<Session>,
    built: u64,
}

impl SessionProvider {
    #[must_use]
    pub fn new(worker: usize, user_agent: impl Into<String>) -> Self {
        Self {
            worker,
            user_agent: user_agent.into(),
            current: None,
            built: 0,
        }
    }

    /// Returns the worker's session, building one on first use. With
    /// `force_new` the existing session is discarded first.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the user agent is not a valid header value
    /// or the underlying `reqwest::Client` cannot be constructed.
    pub fn get(&mut self, force_new: bool) -> Result<&Session, ScraperError> {
        if force_new {
            if let Some(stale) = self.current.take() {
                tracing::debug!(
                    worker = self.worker,
                    generation = stale.generation,
                    "discarding session"
                );
            }
        }

        let session = match self.current.take() {
            Some(session) => session,
            None => {
                let client = build_client(&self.user_agent)?;
                self.built += 1;
                tracing::debug!(worker = self.worker, generation = self.built, "new session");
                Session {
                    client,
                    generation: self.built,
                }
            }
        };
        Ok(self.current.insert(session))
    }

    #[must_use]
    pub fn worker(&self) -> usize {
        self.worker
    }

    /// How many sessions this provider has built so far.
    #[must_use]
    pub fn sessions_built(&self) -> u64 {
        self.built
    }
}

fn build_client(user_agent: &str) -> Result<Client, ScraperError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).map_err(|e| ScraperError::InvalidHeader {
            header: "user-agent",
            reason: e.to_string(),
        })?,
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
    );
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    let client = Client::builder()
        .default_headers(headers)
        .cookie_store(true)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UA: &str = "Mozilla/5.0 (test)";

    #[test]
    fn reuses_session_until_renewal_is_forced() {
        let mut provider = SessionProvider::new(0, UA);
        assert_eq!(provider.get(false).unwrap().generation(), 1);
        assert_eq!(provider.get(false).unwrap().generation(), 1);
        assert_eq!(provider.get(true).unwrap().generation(), 2);
        assert_eq!(provider.get(false).unwrap().generation(), 2);
        assert_eq!(provider.sessions_built(), 2);
    }

    #[test]
    fn first_call_with_force_new_builds_once() {
        let mut provider = SessionProvider::new(3, UA);
        assert_eq!(provider.get(true).unwrap().generation(), 1);
        assert_eq!(provider.sessions_built(), 1);
        assert_eq!(provider.worker(), 3);
    }

    #[test]
    fn renewal_is_local_to_one_provider() {
        let mut a = SessionProvider::new(0, UA);
        let mut b = SessionProvider::new(1, UA);
        a.get(false).unwrap();
        b.get(false).unwrap();
        a.get(true).unwrap();
        a.get(true).unwrap();
        assert_eq!(a.get(false).unwrap().generation(), 3);
        assert_eq!(b.get(false).unwrap().generation(), 1);
    }

    #[test]
    fn rejects_user_agent_with_control_characters() {
        let mut provider = SessionProvider::new(0, "bad\nagent");
        let err = provider.get(false).unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidHeader { header: "user-agent", .. }),
            "expected InvalidHeader, got: {err:?}"
        );
        assert_eq!(provider.sessions_built(), 0);
    }
}
