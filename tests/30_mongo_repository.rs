mod common;

use anyhow::Result;

use telco_churn_api::database::models::{
    ContractDocument, ContractDocumentPatch, CustomerDocument, CustomerDocumentPatch, CustomerField, CustomerSearch,
};
use telco_churn_api::database::{ContractDocuments, CustomerDocuments, DatabaseError, EntityRepository};

fn customer(customer_id: &str) -> CustomerDocument {
    CustomerDocument {
        id: None,
        customer_id: customer_id.to_string(),
        customer_name: format!("Customer_{}", customer_id),
        gender: "Female".to_string(),
        senior_citizen: false,
        partner: true,
        dependents: false,
        tenure: 1,
        phone_service: false,
    }
}

fn contract(customer_id: &str) -> ContractDocument {
    ContractDocument {
        id: None,
        customer_id: customer_id.to_string(),
        contract_type: "Month-to-month".to_string(),
        paperless_billing: true,
        payment_method: "Electronic check".to_string(),
        monthly_charges: 29.85,
        total_charges: 29.85,
        churn: false,
    }
}

#[tokio::test]
async fn contract_lifecycle_by_customer_id() -> Result<()> {
    let Some(db) = common::test_stores().await? else { return Ok(()) };
    let contracts = ContractDocuments::new(db);
    let key = "TEST001".to_string();
    contracts.delete(&key).await?;

    let created = contracts.create(contract(&key)).await?;
    assert!(created.id.is_some());

    let fetched = contracts.get(&key).await?.expect("contract stored");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.payment_method, "Electronic check");

    assert!(contracts.delete(&key).await?);
    assert!(contracts.get(&key).await?.is_none());
    assert!(!contracts.delete(&key).await?);
    Ok(())
}

#[tokio::test]
async fn duplicate_customer_id_is_validation_error() -> Result<()> {
    let Some(db) = common::test_stores().await? else { return Ok(()) };
    let customers = CustomerDocuments::new(db);
    let key = common::unique_id("DUP");

    customers.create(customer(&key)).await?;
    let err = customers.create(customer(&key)).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation(_)), "{:?}", err);

    customers.delete(&key).await?;
    Ok(())
}

#[tokio::test]
async fn bare_customer_profile_has_empty_slots() -> Result<()> {
    let Some(db) = common::test_stores().await? else { return Ok(()) };
    let customers = CustomerDocuments::new(db.clone());
    let contracts = ContractDocuments::new(db);
    let key = common::unique_id("BARE");

    assert!(customers.get_complete(&key).await?.is_none());

    let created = customers.create(customer(&key)).await?;
    let profile = customers.get_complete(&key).await?.expect("customer exists");
    assert_eq!(profile.customer, created);
    assert!(profile.contract.is_none());
    assert!(profile.service.is_none());

    contracts.create(contract(&key)).await?;
    let profile = customers.get_complete(&key).await?.expect("customer exists");
    assert_eq!(profile.contract.map(|c| c.customer_id), Some(key.clone()));
    assert!(profile.service.is_none());

    contracts.delete(&key).await?;
    customers.delete(&key).await?;
    Ok(())
}

#[tokio::test]
async fn document_updates_are_partial_and_empty_is_noop() -> Result<()> {
    let Some(db) = common::test_stores().await? else { return Ok(()) };
    let customers = CustomerDocuments::new(db.clone());
    let key = common::unique_id("UPD");

    let created = customers.create(customer(&key)).await?;
    let before = db.stats();
    assert_eq!(customers.update(&key, CustomerDocumentPatch::default()).await?, Some(created.clone()));
    assert_eq!(db.stats(), before);

    let updated = customers
        .update(&key, CustomerDocumentPatch { tenure: Some(24), ..Default::default() })
        .await?
        .expect("customer exists");
    assert_eq!(updated.tenure, 24);
    assert_eq!(updated.customer_name, created.customer_name);
    assert_eq!(db.stats().document_writes, before.document_writes + 1);

    let missing = common::unique_id("NONE");
    assert!(customers
        .update(&missing, CustomerDocumentPatch { tenure: Some(1), ..Default::default() })
        .await?
        .is_none());

    customers.delete(&key).await?;
    Ok(())
}

#[tokio::test]
async fn contract_charges_update() -> Result<()> {
    let Some(db) = common::test_stores().await? else { return Ok(()) };
    let contracts = ContractDocuments::new(db);
    let key = common::unique_id("CHG");

    contracts.create(contract(&key)).await?;
    let updated = contracts
        .update(&key, ContractDocumentPatch { monthly_charges: Some(99.5), churn: Some(true), ..Default::default() })
        .await?
        .expect("contract exists");
    assert_eq!(updated.monthly_charges, 99.5);
    assert!(updated.churn);
    assert_eq!(updated.total_charges, 29.85);

    contracts.delete(&key).await?;
    Ok(())
}

#[tokio::test]
async fn search_matches_every_criterion() -> Result<()> {
    let Some(db) = common::test_stores().await? else { return Ok(()) };
    let customers = CustomerDocuments::new(db);
    let senior = common::unique_id("SRCH-A");
    let junior = common::unique_id("SRCH-B");

    customers
        .create(CustomerDocument { senior_citizen: true, tenure: 777, ..customer(&senior) })
        .await?;
    customers.create(CustomerDocument { tenure: 777, ..customer(&junior) }).await?;

    let search = CustomerSearch {
        senior_citizen: Some(true),
        tenure: Some(777),
        ..Default::default()
    };
    let criteria = search.criteria();
    assert_eq!(criteria.len(), 2);
    assert!(criteria.fields().any(|f| f == CustomerField::SeniorCitizen));

    let found = customers.search(&criteria, 0, 1000).await?;
    assert!(found.iter().any(|c| c.customer_id == senior));
    assert!(found.iter().all(|c| c.senior_citizen && c.tenure == 777));

    let listed = customers.list(0, 1000).await?;
    assert!(listed.windows(2).all(|w| w[0].customer_id <= w[1].customer_id));

    customers.delete(&senior).await?;
    customers.delete(&junior).await?;
    Ok(())
}
