//! External collaborators: a dependency parser and a masked-language-model
//! completion service.
//!
//! The core never parses or predicts words itself. Functions that need to
//! reparse a rewritten sentence or fill a masked subject take these traits
//! explicitly. With the `http` feature, [`HttpCompleter`] talks to a
//! fill-mask endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CollaboratorError, SentenceTree};

/// Turns text into a dependency tree.
pub trait Parse {
    fn parse(&self, text: &str) -> Result<SentenceTree, CollaboratorError>;
}

/// Ranks fillings of the mask token in `masked`, best first.
pub trait Complete {
    /// Must give up after `timeout`.
    fn complete(&self, masked: &str, timeout: Duration) -> Result<Vec<Completion>, CollaboratorError>;
}

/// One ranked filling: the whole sequence with the mask replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub sequence: String,
    pub score: f64,
}

impl<T: Parse + ?Sized> Parse for &T {
    fn parse(&self, text: &str) -> Result<SentenceTree, CollaboratorError> {
        (**self).parse(text)
    }
}

impl<T: Complete + ?Sized> Complete for &T {
    fn complete(&self, masked: &str, timeout: Duration) -> Result<Vec<Completion>, CollaboratorError> {
        (**self).complete(masked, timeout)
    }
}

#[cfg(feature = "http")]
pub use http::HttpCompleter;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::Client;
    use serde_json::json;
    use tracing::{debug, warn};

    use super::{Complete, Completion};
    use crate::CollaboratorError;

    /// Blocking client for a fill-mask inference endpoint that accepts
    /// `{"inputs": "..."}` and answers `[{"sequence": "...", "score": ...}, ...]`.
    #[derive(Debug, Clone)]
    pub struct HttpCompleter {
        http: Client,
        url: String,
        token: Option<String>,
    }

    impl HttpCompleter {
        pub fn new(url: &str) -> Self {
            let http = Client::builder()
                .connect_timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_else(|_| Client::new());
            HttpCompleter { http, url: url.to_string(), token: None }
        }

        /// Sent as a bearer token.
        pub fn with_token(mut self, token: impl Into<String>) -> Self {
            self.token = Some(token.into());
            self
        }
    }

    impl Complete for HttpCompleter {
        fn complete(&self, masked: &str, timeout: Duration) -> Result<Vec<Completion>, CollaboratorError> {
            debug!(url = %self.url, "fill-mask request");
            let mut request = self.http.post(&self.url).timeout(timeout).json(&json!({ "inputs": masked }));
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = request.send().map_err(|e| {
                if e.is_timeout() {
                    warn!(url = %self.url, ?timeout, "fill-mask request timed out");
                    CollaboratorError::Timeout { limit: timeout }
                } else {
                    warn!(url = %self.url, error = %e, "fill-mask request failed");
                    CollaboratorError::Unavailable(e.to_string())
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(CollaboratorError::Unavailable(format!("fill-mask endpoint answered {status}")));
            }
            response.json::<Vec<Completion>>().map_err(|e| CollaboratorError::Malformed(e.to_string()))
        }
    }
}
