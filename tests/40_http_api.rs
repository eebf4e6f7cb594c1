mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn postgres_customer_crud_over_http() -> Result<()> {
    if common::test_store_urls().is_none() {
        eprintln!("skipping: test stores not configured");
        return Ok(());
    }
    // Schema must exist before the server handles writes
    let Some(_db) = common::test_stores().await? else { return Ok(()) };
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/postgresql/customers/"))
        .json(&json!({
            "customer_name": "John Doe",
            "gender": "Male",
            "senior_citizen": false,
            "partner": true,
            "dependents": false,
            "tenure": 12,
            "phone_service": true
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let created: Value = res.json().await?;
    let id = created["customer_id"].as_i64().expect("id assigned");

    let res = client
        .put(server.url(&format!("/api/postgresql/customers/{}", id)))
        .json(&json!({ "tenure": 24 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["tenure"], json!(24));
    assert_eq!(updated["customer_name"], json!("John Doe"));

    let res = client
        .delete(server.url(&format!("/api/postgresql/customers/{}", id)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Customer deleted successfully" }));

    let res = client
        .get(server.url(&format!("/api/postgresql/customers/{}", id)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], json!("Customer not found"));
    Ok(())
}

#[tokio::test]
async fn mongo_contract_crud_over_http() -> Result<()> {
    let Some(_db) = common::test_stores().await? else { return Ok(()) };
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let key = common::unique_id("HTTP");

    let res = client
        .post(server.url("/api/mongodb/contracts/"))
        .json(&json!({
            "customerID": key,
            "Contract": "One year",
            "PaperlessBilling": false,
            "PaymentMethod": "Mailed check",
            "MonthlyCharges": 56.95,
            "TotalCharges": 1889.5,
            "Churn": false
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let created: Value = res.json().await?;
    assert!(created["_id"].is_string());

    let fetched: Value = client
        .get(server.url(&format!("/api/mongodb/contracts/{}", key)))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched["_id"], created["_id"]);
    assert_eq!(fetched["Contract"], json!("One year"));

    let res = client
        .get(server.url(&format!("/api/mongodb/customers/{}/complete", key)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(server.url(&format!("/api/mongodb/contracts/{}", key)))
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Contract deleted successfully" }));

    let res = client
        .get(server.url(&format!("/api/mongodb/contracts/{}", key)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
