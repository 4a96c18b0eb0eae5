// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

use serde_json::json;
use xtdb::Client;

fn test_client() -> Option<Client> {
    dotenvy::dotenv().ok();
    if std::env::var("XTDB_INTEGRATION").is_err() {
        eprintln!("XTDB_INTEGRATION not set; skipping integration test");
        return None;
    }
    let uri = std::env::var("XTDB_TEST_URI").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    Some(Client::new(uri))
}

#[test]
fn integration_status_smoke() {
    let Some(client) = test_client() else {
        return;
    };
    let status = client.status().expect("status failed");
    assert!(status.is_object(), "unexpected status body: {status}");
}

#[test]
fn integration_put_then_query_smoke() {
    let Some(client) = test_client() else {
        return;
    };

    let report = client
        .put(json!({"xt/id": "integration-smoke", "name": "Smoke"}), None, None)
        .expect("put failed");
    client
        .await_tx(&[("tx-id", json!(report.tx_id))])
        .expect("await-tx failed");

    let mut query = client.find("?e");
    query
        .where_clause("?e :name \"Smoke\"")
        .expect("builder rejected clause");
    let rows = query.materialize().expect("query failed").to_vec();
    assert!(
        rows.iter().any(|row| row == &json!(["integration-smoke"])),
        "document not found in {rows:?}"
    );
}
