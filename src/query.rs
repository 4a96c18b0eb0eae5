// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Fluent query construction and single-pass result iteration.
//!
//! A [`Query`] is a single-use builder: accumulate a find clause and
//! where-clauses while building, then materialize once. After the first
//! materialization the builder is sealed; further `find`/`where_clause`
//! calls fail with [`Error::AlreadySent`]. Iterating a query consumes the
//! cached rows from the back, so rows come out in the reverse of the order
//! the server returned them, and a second pass yields nothing.

use serde_json::Value;

use crate::client::Client;
use crate::error::{Error, Result};

pub struct Query<'a> {
    client: &'a Client,
    find_clause: Option<String>,
    where_clauses: Vec<String>,
    // Populated exactly once, on first materialization; Some(..) seals the
    // builder against further mutation.
    results: Option<Vec<Value>>,
    last_error: Option<String>,
    done: bool,
}

impl<'a> Query<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            find_clause: None,
            where_clauses: Vec::new(),
            results: None,
            last_error: None,
            done: false,
        }
    }

    fn sent(&self) -> bool {
        self.results.is_some()
    }

    /// Sets (or overwrites) the find clause.
    pub fn find(&mut self, clause: impl Into<String>) -> Result<&mut Self> {
        if self.sent() {
            return Err(Error::AlreadySent);
        }
        self.find_clause = Some(clause.into());
        Ok(self)
    }

    /// Appends a where-clause. Clauses are conjunctive.
    pub fn where_clause(&mut self, clause: impl Into<String>) -> Result<&mut Self> {
        if self.sent() {
            return Err(Error::AlreadySent);
        }
        self.where_clauses.push(clause.into());
        Ok(self)
    }

    /// The structured error payload recorded by a soft-failed
    /// materialization, pretty-printed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Renders the query text. An absent find clause renders an empty find
    /// vector; whether that is meaningful is the server's call.
    pub fn render(&self) -> String {
        format!(
            "{{\n :find [{}]\n :where [\n  [{}]\n ]\n}}",
            self.find_clause.as_deref().unwrap_or_default(),
            self.where_clauses.join("]\n  [")
        )
    }

    /// Sends the query on first call and caches the rows; afterwards returns
    /// the cache without touching the network.
    ///
    /// Fails with [`Error::MissingWhereClause`] before any request is made
    /// when no where-clause was added. A transport or status failure
    /// propagates and leaves the builder unsent. A response body that is not
    /// an array is treated as a structured error payload: it is recorded in
    /// [`last_error`](Self::last_error) and the cached result is empty.
    pub fn materialize(&mut self) -> Result<&[Value]> {
        if !self.sent() {
            if self.where_clauses.is_empty() {
                return Err(Error::MissingWhereClause);
            }
            let text = self.render();
            tracing::debug!(query = %text, "materializing query");
            let rows = match self.client.query(&text, None)? {
                Value::Array(rows) => rows,
                other => {
                    self.last_error = Some(pretty(&other));
                    Vec::new()
                }
            };
            self.results = Some(rows);
        }
        Ok(self.results.as_deref().unwrap_or_default())
    }
}

fn pretty(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

impl Iterator for Query<'_> {
    type Item = Result<Value>;

    /// Pops the rightmost remaining cached row. The first call triggers
    /// materialization; a materialization error is yielded once and the
    /// iterator is then done.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.sent() {
            if let Err(err) = self.materialize() {
                self.done = true;
                return Some(Err(err));
            }
        }
        match self.results.as_mut().and_then(Vec::pop) {
            Some(row) => Some(Ok(row)),
            None => {
                self.done = true;
                None
            }
        }
    }
}
