//! Blocking fetch of reference documents.

use std::time::Duration;

use ureq::Agent;

use crate::error::ResolveError;

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Fetches a URL as text.
pub trait Transport {
    /// # Errors
    ///
    /// Returns a [`ResolveError`] on network failure or an error status.
    fn get(&self, url: &str) -> Result<String, ResolveError>;
}

/// [`Transport`] over a `ureq` agent.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    agent: Agent,
}

impl HttpTransport {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT))
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, ResolveError> {
        tracing::info!(url, "Fetching");
        let response = self.agent.get(url).call()?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(ResolveError::HttpStatus {
                status,
                url: url.to_owned(),
            });
        }
        Ok(response.into_body().read_to_string()?)
    }
}
