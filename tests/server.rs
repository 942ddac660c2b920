mod common;

use anyhow::Result;
use serde_json::json;

#[tokio::test]
async fn test_create_and_list_users() -> Result<()> {
    let store = common::seeded_store(0);
    let port = 3040;
    let server_handle = common::start_test_server(store, port).await?;

    let client = reqwest::Client::new();
    let base_url = format!("http://127.0.0.1:{}", port);

    // Create a user
    let res = client
        .post(format!("{}/new-user", base_url))
        .json(&json!({
            "firstName": "John",
            "lastName": "Doe",
            "position": "Developer",
            "phone": "123-456-7890",
            "email": "john.doe@example.com"
        }))
        .send()
        .await?;
    assert!(res.status().is_success());
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Create user success");
    assert_eq!(body["result"]["firstName"], "John");
    assert_eq!(body["result"]["id"], 1);

    // Duplicate email is rejected with field-level errors
    let res = client
        .post(format!("{}/new-user", base_url))
        .json(&json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "position": "Designer",
            "phone": "1",
            "email": "john.doe@example.com"
        }))
        .send()
        .await?;
    assert_eq!(res.status().as_u16(), 400);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"][0]["field"], "email");
    assert_eq!(body["errors"][0]["message"], "Email is already in use");

    // Missing fields are all reported together
    let res = client
        .post(format!("{}/new-user", base_url))
        .json(&json!({
            "firstName": "",
            "lastName": "",
            "position": "",
            "phone": "",
            "email": ""
        }))
        .send()
        .await?;
    assert_eq!(res.status().as_u16(), 400);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["errors"].as_array().unwrap().len(), 5);

    // List endpoint returns the single stored record
    let res = client.get(format!("{}/users", base_url)).send().await?;
    assert!(res.status().is_success());
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["message"], "Get all user success");
    assert_eq!(body["result"].as_array().unwrap().len(), 1);

    server_handle.abort();
    Ok(())
}

#[tokio::test]
async fn test_batch_update_users() -> Result<()> {
    let store = common::seeded_store(2);
    let port = 3041;
    let server_handle = common::start_test_server(store, port).await?;

    let client = reqwest::Client::new();
    let base_url = format!("http://127.0.0.1:{}", port);

    // Non-array body is a 400
    let res = client
        .patch(format!("{}/users", base_url))
        .json(&json!({"id": 1}))
        .send()
        .await?;
    assert_eq!(res.status().as_u16(), 400);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["message"], "Invalid data format");

    // Mixed batch: one real update, one unknown id, one missing id
    let res = client
        .patch(format!("{}/users", base_url))
        .json(&json!([
            {
                "id": 1,
                "firstName": "Renamed",
                "lastName": "Last0",
                "position": "Engineer",
                "phone": "555-0100",
                "email": "user0@example.com"
            },
            {
                "id": 42,
                "firstName": "Ghost",
                "lastName": "X",
                "position": "Y",
                "phone": "1",
                "email": "ghost@example.com"
            },
            {
                "firstName": "NoId",
                "lastName": "X",
                "position": "Y",
                "phone": "1",
                "email": "noid@example.com"
            }
        ]))
        .send()
        .await?;
    assert!(res.status().is_success());
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Users updated successfully");
    assert_eq!(body["result"].as_array().unwrap().len(), 1);
    assert_eq!(body["result"][0]["firstName"], "Renamed");
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["id"], 42);
    assert_eq!(errors[0]["message"], "User with ID 42 not found");
    assert_eq!(errors[1]["message"], "User ID is required");

    // The update stuck
    let res = client.get(format!("{}/users", base_url)).send().await?;
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["result"][0]["firstName"], "Renamed");

    server_handle.abort();
    Ok(())
}

#[tokio::test]
async fn test_paginate_endpoint() -> Result<()> {
    let store = common::seeded_store(10);
    let port = 3042;
    let server_handle = common::start_test_server(store, port).await?;

    let client = reqwest::Client::new();
    let base_url = format!("http://127.0.0.1:{}", port);

    // Defaults: page 1, limit 8
    let res = client.get(format!("{}/paginate", base_url)).send().await?;
    assert!(res.status().is_success());
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["result"].as_array().unwrap().len(), 8);
    assert_eq!(body["total"], 10);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 8);

    // Page past the end keeps the correct total
    let res = client
        .get(format!("{}/paginate?page=3&limit=8", base_url))
        .send()
        .await?;
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["result"].as_array().unwrap().len(), 0);
    assert_eq!(body["total"], 10);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["page"], 3);

    // Search narrows the count with the same filter for rows and total
    let res = client
        .get(format!("{}/paginate?search=Designer&limit=3", base_url))
        .send()
        .await?;
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["total"], 5);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["result"].as_array().unwrap().len(), 3);

    // Zero limit is rejected, not clamped
    let res = client
        .get(format!("{}/paginate?limit=0", base_url))
        .send()
        .await?;
    assert_eq!(res.status().as_u16(), 400);

    server_handle.abort();
    Ok(())
}

#[tokio::test]
async fn test_status_and_unmatched_paths() -> Result<()> {
    let store = common::seeded_store(3);
    let port = 3043;
    let server_handle = common::start_test_server(store, port).await?;

    let client = reqwest::Client::new();
    let base_url = format!("http://127.0.0.1:{}", port);

    let res = client.get(format!("{}/status", base_url)).send().await?;
    assert!(res.status().is_success());
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["server"]["version"], "test");
    assert_eq!(body["records"]["count"], 3);

    let res = client
        .get(format!("{}/no-such-route", base_url))
        .send()
        .await?;
    assert_eq!(res.status().as_u16(), 404);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], false);

    server_handle.abort();
    Ok(())
}
