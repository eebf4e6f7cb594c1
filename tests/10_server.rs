mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn root_banner() -> Result<()> {
    let server = common::ensure_server().await?;
    let body: Value = reqwest::get(server.url("/")).await?.json().await?;
    assert_eq!(body["message"], json!("Telco Customer Churn API is running!"));
    Ok(())
}

#[tokio::test]
async fn health_reports_both_stores() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/health")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["message"], json!("Health Check"));
    for store in ["postgresql", "mongodb"] {
        let status = body["data"][store].as_str().unwrap_or_default();
        assert!(status == "connected" || status == "disconnected", "{}: {}", store, status);
    }
    let overall = body["data"]["overall"].as_str().unwrap_or_default();
    assert!(overall == "healthy" || overall == "unhealthy");
    Ok(())
}

#[tokio::test]
async fn prediction_log_round_trip() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/predictions"))
        .json(&json!({
            "record_id": 1,
            "prediction": 0,
            "probability": 0.35,
            "predicted_at": "2024-05-01T10:00:00Z",
            "inputs": { "feature_1": 3.5, "feature_2": 2.8, "feature_3": 0.0 }
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "status": "ok", "logged": true }));
    Ok(())
}

#[tokio::test]
async fn latest_record_reads_dataset_directory() -> Result<()> {
    let server = common::ensure_server().await?;
    std::fs::write(
        server.data_dir.path().join("telco.csv"),
        "customerID,tenure,MonthlyCharges\n7590-VHVEG,1,29.85\n5575-GNVDE,34,56.95\n",
    )?;

    let body: Value = reqwest::get(server.url("/api/records/latest")).await?.json().await?;
    assert_eq!(body, json!({ "customerID": "5575-GNVDE", "tenure": 34, "MonthlyCharges": 56.95 }));
    Ok(())
}

#[tokio::test]
async fn invalid_limit_is_unprocessable() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/api/postgresql/customers/?limit=0")).await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await?;
    assert!(body["field_errors"]["limit"].is_string());
    Ok(())
}
