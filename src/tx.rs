// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Transaction operations and the submission batch.
//!
//! A [`Transaction`] accumulates an ordered, append-only sequence of
//! operations and renders them once into the `{"tx-ops": [...]}` submission
//! body. Operations are wire tuples: `["put", doc]`, `["delete", eid]` and
//! so on, with optional valid-time positions appended at the end.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

/// One unit of change in a transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum TxOp {
    Put {
        doc: Value,
        valid_time: Option<DateTime<Utc>>,
        end_valid_time: Option<DateTime<Utc>>,
    },
    Delete {
        eid: Value,
        valid_time: Option<DateTime<Utc>>,
        end_valid_time: Option<DateTime<Utc>>,
    },
    Evict {
        eid: Value,
    },
    Match {
        eid: Value,
        expected: Value,
        ops: Vec<TxOp>,
    },
}

impl TxOp {
    /// Renders the wire tuple for this operation.
    ///
    /// A time position is appended only when `valid_time` is present, and an
    /// end position only when both bounds are present, so tuples are length
    /// 2, 3, or 4 and never carry a hole.
    pub fn render(&self) -> Value {
        match self {
            TxOp::Put {
                doc,
                valid_time,
                end_valid_time,
            } => tuple_with_times("put", doc.clone(), valid_time, end_valid_time),
            TxOp::Delete {
                eid,
                valid_time,
                end_valid_time,
            } => tuple_with_times("delete", eid.clone(), valid_time, end_valid_time),
            TxOp::Evict { eid } => json!(["evict", eid]),
            TxOp::Match { eid, expected, ops } => {
                let ops: Vec<Value> = ops.iter().map(TxOp::render).collect();
                json!(["match", eid, expected, ops])
            }
        }
    }
}

fn tuple_with_times(
    tag: &str,
    subject: Value,
    valid_time: &Option<DateTime<Utc>>,
    end_valid_time: &Option<DateTime<Utc>>,
) -> Value {
    let mut tuple = vec![json!(tag), subject];
    if let Some(vt) = valid_time {
        tuple.push(timestamp(vt));
        if let Some(evt) = end_valid_time {
            tuple.push(timestamp(evt));
        }
    }
    Value::Array(tuple)
}

fn timestamp(t: &DateTime<Utc>) -> Value {
    Value::String(t.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// An ordered batch of transaction operations.
///
/// Append-only; build it up with the chainable operation methods, then hand
/// it to [`Client::submit_tx`](crate::Client::submit_tx). A batch is meant
/// for a single submission and is discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    ops: Vec<TxOp>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a put of `doc`, optionally bounded in valid time.
    ///
    /// `end_valid_time` without `valid_time` is dropped: the wire tuple has
    /// no slot for an end position alone.
    pub fn put(
        &mut self,
        doc: Value,
        valid_time: Option<DateTime<Utc>>,
        end_valid_time: Option<DateTime<Utc>>,
    ) -> &mut Self {
        self.ops.push(TxOp::Put {
            doc,
            valid_time,
            end_valid_time,
        });
        self
    }

    /// Appends a delete of `eid`, with the same bound rule as [`put`](Self::put).
    pub fn delete(
        &mut self,
        eid: Value,
        valid_time: Option<DateTime<Utc>>,
        end_valid_time: Option<DateTime<Utc>>,
    ) -> &mut Self {
        self.ops.push(TxOp::Delete {
            eid,
            valid_time,
            end_valid_time,
        });
        self
    }

    /// Appends an evict of `eid`. Eviction has no temporal bounds.
    pub fn evict(&mut self, eid: Value) -> &mut Self {
        self.ops.push(TxOp::Evict { eid });
        self
    }

    /// Appends a conditional match: `ops` apply only if the current document
    /// for `eid` equals `expected`.
    ///
    /// `valid_time` is accepted and ignored; match tuples never carry a time
    /// position on the wire.
    pub fn match_doc(
        &mut self,
        eid: Value,
        expected: Value,
        ops: Vec<TxOp>,
        valid_time: Option<DateTime<Utc>>,
    ) -> &mut Self {
        let _ = valid_time;
        self.ops.push(TxOp::Match { eid, expected, ops });
        self
    }

    pub fn ops(&self) -> &[TxOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Renders the submission body. Pure and idempotent; the batch is
    /// untouched and can keep accumulating afterwards.
    pub fn render(&self) -> Value {
        let ops: Vec<Value> = self.ops.iter().map(TxOp::render).collect();
        json!({ "tx-ops": ops })
    }
}

/// Receipt for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReport {
    pub tx_id: u64,
    pub tx_time: DateTime<Utc>,
}
