// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Rust XTDB client library.
//!
//! Exposes a synchronous REST client for a bitemporal document database
//! node: transaction batches (put/delete/evict/match), a fluent Datalog
//! query builder with single-pass result iteration, and the node's status,
//! transaction-log, and query-diagnostic endpoints.
//!
//! ```no_run
//! use serde_json::json;
//! use xtdb::{Client, Transaction};
//!
//! let client = Client::new("http://localhost:3000");
//!
//! let mut tx = Transaction::new();
//! tx.put(json!({"xt/id": "ivan", "name": "Ivan"}), None, None);
//! let report = client.submit_tx(&tx)?;
//! println!("committed tx {}", report.tx_id);
//!
//! let mut people = client.find("?name");
//! people.where_clause("?e :name ?name")?;
//! for row in people {
//!     println!("{:?}", row?);
//! }
//! # Ok::<(), xtdb::Error>(())
//! ```

pub mod client;
pub mod edn;
pub mod error;
pub mod params;
pub mod query;
pub mod transport;
pub mod tx;

#[cfg(test)]
mod test_util;

pub use crate::client::{
    with_client_tag, with_request_timeout, Client, ClientOption, DEFAULT_URI,
};
pub use crate::edn::to_edn;
pub use crate::error::{is_status_error, Error, Result};
pub use crate::params::{ParamFormat, ParamSpec};
pub use crate::query::Query;
pub use crate::transport::{HttpTransport, Transport, DEFAULT_REQUEST_TIMEOUT};
pub use crate::tx::{Transaction, TxOp, TxReport};
