// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! The REST transport boundary.
//!
//! Everything the client knows about the network fits in the [`Transport`]
//! trait: three synchronous, blocking, single-attempt calls that return a
//! decoded JSON body or an error. Retry, circuit-breaking, and cancellation
//! policy belong to implementations or the layers around them, never to the
//! builder/codec core.

use std::time::Duration;

use serde_json::Value;

use crate::error::{Error, Result};

pub const JSON_MIME_TYPE: &str = "application/json";
pub const EDN_MIME_TYPE: &str = "application/edn";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Narrow REST capability the client core depends on.
pub trait Transport: Send + Sync {
    /// GET `action` with URL parameters; JSON response.
    fn get(&self, action: &str, params: &[(String, String)]) -> Result<Value>;

    /// POST `action` with a JSON body; JSON response.
    fn post_json(&self, action: &str, body: &Value) -> Result<Value>;

    /// POST `action` with an EDN text body and URL parameters; JSON response.
    fn post_edn(&self, action: &str, body: &str, params: &[(String, String)]) -> Result<Value>;
}

/// `ureq`-backed transport against a node's `/_xtdb` endpoints.
pub struct HttpTransport {
    base_url: String,
    user_agent: Option<String>,
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self::with_user_agent(base_url, timeout, None)
    }

    pub fn with_user_agent(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: Option<String>,
    ) -> Self {
        let base_url = base_url.into();
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent,
            agent,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/_xtdb/{}", self.base_url, action)
    }

    fn prepare(&self, mut request: ureq::Request, params: &[(String, String)]) -> ureq::Request {
        request = request.set("Accept", JSON_MIME_TYPE);
        if let Some(tag) = &self.user_agent {
            request = request.set("User-Agent", tag);
        }
        for (name, value) in params {
            request = request.query(name, value);
        }
        request
    }

    fn finish(result: std::result::Result<ureq::Response, ureq::Error>) -> Result<Value> {
        match result {
            Ok(response) => response
                .into_json::<Value>()
                .map_err(|err| Error::invalid_response(err.to_string())),
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(Error::Status { code, body })
            }
            Err(err) => Err(Error::transport(err.to_string())),
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, action: &str, params: &[(String, String)]) -> Result<Value> {
        tracing::debug!(action = %action, "xtdb get");
        let request = self.prepare(self.agent.get(&self.endpoint(action)), params);
        Self::finish(request.call())
    }

    fn post_json(&self, action: &str, body: &Value) -> Result<Value> {
        tracing::debug!(action = %action, "xtdb post json");
        let request = self.prepare(self.agent.post(&self.endpoint(action)), &[]);
        Self::finish(request.send_json(body))
    }

    fn post_edn(&self, action: &str, body: &str, params: &[(String, String)]) -> Result<Value> {
        tracing::debug!(action = %action, "xtdb post edn");
        let request = self
            .prepare(self.agent.post(&self.endpoint(action)), params)
            .set("Content-Type", EDN_MIME_TYPE);
        Self::finish(request.send_string(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_action() {
        let transport = HttpTransport::new("http://localhost:3000", DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(
            transport.endpoint("status"),
            "http://localhost:3000/_xtdb/status"
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let transport = HttpTransport::new("http://localhost:3000/", DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(
            transport.endpoint("submit-tx"),
            "http://localhost:3000/_xtdb/submit-tx"
        );
    }
}
