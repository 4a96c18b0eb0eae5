// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Client handle over a node's REST surface.
//!
//! A [`Client`] owns a boxed [`Transport`] and exposes one method per
//! endpoint. Parameterized endpoints each declare a closed whitelist of the
//! wire parameter names they recognize; an unrecognized name fails before
//! any request leaves the process.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::params::{self, ParamSpec};
use crate::query::Query;
use crate::transport::{HttpTransport, Transport, DEFAULT_REQUEST_TIMEOUT};
use crate::tx::{Transaction, TxReport};

pub const DEFAULT_URI: &str = "http://localhost:3000";

/// Construction-time client options.
#[derive(Debug, Clone)]
pub enum ClientOption {
    RequestTimeout(Duration),
    ClientTag(String),
}

pub fn with_request_timeout(timeout: Duration) -> ClientOption {
    ClientOption::RequestTimeout(timeout)
}

/// Tag reported as the User-Agent on every request.
pub fn with_client_tag(tag: impl Into<String>) -> ClientOption {
    ClientOption::ClientTag(tag.into())
}

pub const QUERY_PARAMS: &[ParamSpec] = &[
    ParamSpec::edn("query-edn"),
    ParamSpec::edn("in-args-edn"),
    ParamSpec::json("in-args-json"),
    ParamSpec::raw("valid-time"),
    ParamSpec::raw("tx-time"),
    ParamSpec::raw("tx-id"),
];

pub const ENTITY_PARAMS: &[ParamSpec] = &[
    ParamSpec::raw("eid"),
    ParamSpec::json("eid-json"),
    ParamSpec::edn("eid-edn"),
    ParamSpec::raw("valid-time"),
    ParamSpec::raw("tx-time"),
    ParamSpec::raw("tx-id"),
];

pub const ENTITY_HISTORY_PARAMS: &[ParamSpec] = &[
    ParamSpec::raw("eid"),
    ParamSpec::json("eid-json"),
    ParamSpec::edn("eid-edn"),
    ParamSpec::raw("sort-order"),
    ParamSpec::raw("with-corrections"),
    ParamSpec::raw("with-docs"),
    ParamSpec::raw("start-valid-time"),
    ParamSpec::raw("start-tx-time"),
    ParamSpec::raw("start-tx-id"),
    ParamSpec::raw("end-valid-time"),
    ParamSpec::raw("end-tx-time"),
    ParamSpec::raw("end-tx-id"),
];

pub const ENTITY_TX_PARAMS: &[ParamSpec] = &[
    ParamSpec::raw("eid"),
    ParamSpec::json("eid-json"),
    ParamSpec::edn("eid-edn"),
    ParamSpec::raw("valid-time"),
    ParamSpec::raw("tx-time"),
    ParamSpec::raw("tx-id"),
];

pub const SYNC_PARAMS: &[ParamSpec] = &[ParamSpec::raw("timeout")];

pub const AWAIT_TX_PARAMS: &[ParamSpec] = &[ParamSpec::raw("tx-id"), ParamSpec::raw("timeout")];

pub const AWAIT_TX_TIME_PARAMS: &[ParamSpec] =
    &[ParamSpec::raw("tx-time"), ParamSpec::raw("timeout")];

pub const TX_LOG_PARAMS: &[ParamSpec] =
    &[ParamSpec::raw("after-tx-id"), ParamSpec::raw("with-ops?")];

pub const TX_COMMITTED_PARAMS: &[ParamSpec] = &[ParamSpec::raw("tx-id")];

pub struct Client {
    transport: Box<dyn Transport>,
}

impl Client {
    pub fn new(uri: impl Into<String>) -> Self {
        Self::with_options(uri, [])
    }

    pub fn with_options(
        uri: impl Into<String>,
        opts: impl IntoIterator<Item = ClientOption>,
    ) -> Self {
        let mut timeout = DEFAULT_REQUEST_TIMEOUT;
        let mut tag = None;
        for opt in opts {
            match opt {
                ClientOption::RequestTimeout(value) => timeout = value,
                ClientOption::ClientTag(value) => tag = Some(value),
            }
        }
        Self::with_transport(Box::new(HttpTransport::with_user_agent(uri, timeout, tag)))
    }

    /// Builds a client over a custom transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Starts a query builder with the find clause set.
    pub fn find(&self, clause: impl Into<String>) -> Query<'_> {
        let mut query = Query::new(self);
        // a fresh builder is never sealed
        let _ = query.find(clause);
        query
    }

    /// Submits raw query text, optionally with positional arguments.
    ///
    /// The trimmed text must be a brace-delimited map; it is wrapped as
    /// `{:query <text>}` (plus `:in-args` when arguments are given) and sent
    /// with the EDN media type.
    pub fn query(&self, query: &str, in_args: Option<&[Value]>) -> Result<Value> {
        let text = query.trim();
        if !(text.starts_with('{') && text.ends_with('}')) {
            return Err(Error::InvalidQuery(text.to_string()));
        }
        let body = match in_args {
            None => format!("{{:query {text}}}"),
            Some(args) => format!(
                "{{:query {} :in-args {}}}",
                text,
                crate::edn::to_edn(&Value::Array(args.to_vec()))
            ),
        };
        self.transport.post_edn("query", &body, &[])
    }

    /// Submits a query entirely via URL parameters (`query-edn` and
    /// friends); the request body is empty.
    pub fn query_params(&self, provided: &[(&str, Value)]) -> Result<Value> {
        let params = params::encode(QUERY_PARAMS, provided)?;
        self.transport.post_edn("query", "", &params)
    }

    /// Submits a transaction batch.
    pub fn submit_tx(&self, tx: &Transaction) -> Result<TxReport> {
        let response = self.transport.post_json("submit-tx", &tx.render())?;
        serde_json::from_value(response).map_err(|err| Error::invalid_response(err.to_string()))
    }

    /// Submits a single-operation put.
    pub fn put(
        &self,
        doc: Value,
        valid_time: Option<DateTime<Utc>>,
        end_valid_time: Option<DateTime<Utc>>,
    ) -> Result<TxReport> {
        let mut tx = Transaction::new();
        tx.put(doc, valid_time, end_valid_time);
        self.submit_tx(&tx)
    }

    /// Submits a single-operation delete.
    pub fn delete(
        &self,
        eid: Value,
        valid_time: Option<DateTime<Utc>>,
        end_valid_time: Option<DateTime<Utc>>,
    ) -> Result<TxReport> {
        let mut tx = Transaction::new();
        tx.delete(eid, valid_time, end_valid_time);
        self.submit_tx(&tx)
    }

    /// Submits a single-operation evict.
    pub fn evict(&self, eid: Value) -> Result<TxReport> {
        let mut tx = Transaction::new();
        tx.evict(eid);
        self.submit_tx(&tx)
    }

    pub fn status(&self) -> Result<Value> {
        self.transport.get("status", &[])
    }

    pub fn entity(&self, provided: &[(&str, Value)]) -> Result<Value> {
        let params = params::encode(ENTITY_PARAMS, provided)?;
        self.transport.get("entity", &params)
    }

    /// Entity history: the `entity` endpoint with a fixed `history=true`
    /// leading parameter.
    pub fn entity_history(&self, provided: &[(&str, Value)]) -> Result<Value> {
        let mut params = params::encode(ENTITY_HISTORY_PARAMS, provided)?;
        params.insert(0, ("history".to_string(), "true".to_string()));
        self.transport.get("entity", &params)
    }

    pub fn entity_tx(&self, provided: &[(&str, Value)]) -> Result<Value> {
        let params = params::encode(ENTITY_TX_PARAMS, provided)?;
        self.transport.get("entity-tx", &params)
    }

    pub fn attribute_stats(&self) -> Result<Value> {
        self.transport.get("attribute-stats", &[])
    }

    pub fn sync(&self, provided: &[(&str, Value)]) -> Result<Value> {
        let params = params::encode(SYNC_PARAMS, provided)?;
        self.transport.get("sync", &params)
    }

    pub fn await_tx(&self, provided: &[(&str, Value)]) -> Result<Value> {
        let params = params::encode(AWAIT_TX_PARAMS, provided)?;
        self.transport.get("await-tx", &params)
    }

    pub fn await_tx_time(&self, provided: &[(&str, Value)]) -> Result<Value> {
        let params = params::encode(AWAIT_TX_TIME_PARAMS, provided)?;
        self.transport.get("await-tx-time", &params)
    }

    pub fn tx_log(&self, provided: &[(&str, Value)]) -> Result<Value> {
        let params = params::encode(TX_LOG_PARAMS, provided)?;
        self.transport.get("tx-log", &params)
    }

    pub fn tx_committed(&self, provided: &[(&str, Value)]) -> Result<Value> {
        let params = params::encode(TX_COMMITTED_PARAMS, provided)?;
        self.transport.get("tx-committed", &params)
    }

    pub fn latest_completed_tx(&self) -> Result<Value> {
        self.transport.get("latest-completed-tx", &[])
    }

    pub fn latest_submitted_tx(&self) -> Result<Value> {
        self.transport.get("latest-submitted-tx", &[])
    }

    pub fn active_queries(&self) -> Result<Value> {
        self.transport.get("active-queries", &[])
    }

    pub fn recent_queries(&self) -> Result<Value> {
        self.transport.get("recent-queries", &[])
    }

    pub fn slowest_queries(&self) -> Result<Value> {
        self.transport.get("slowest-queries", &[])
    }
}
