// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::Result;
use crate::transport::Transport;

/// A scripted transport: hands out queued responses and records every call.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub action: String,
    pub params: Vec<(String, String)>,
    pub body: Option<String>,
}

impl MockTransport {
    pub fn returning(responses: Vec<Result<Value>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> Result<Value> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock transport ran out of scripted responses")
    }
}

impl Transport for Arc<MockTransport> {
    fn get(&self, action: &str, params: &[(String, String)]) -> Result<Value> {
        self.record(RecordedCall {
            method: "GET",
            action: action.to_string(),
            params: params.to_vec(),
            body: None,
        })
    }

    fn post_json(&self, action: &str, body: &Value) -> Result<Value> {
        self.record(RecordedCall {
            method: "POST-JSON",
            action: action.to_string(),
            params: Vec::new(),
            body: Some(body.to_string()),
        })
    }

    fn post_edn(&self, action: &str, body: &str, params: &[(String, String)]) -> Result<Value> {
        self.record(RecordedCall {
            method: "POST-EDN",
            action: action.to_string(),
            params: params.to_vec(),
            body: Some(body.to_string()),
        })
    }
}
