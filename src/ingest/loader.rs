use mongodb::bson::Document;
use sqlx::PgConnection;
use tracing::info;

use crate::database::models::{Contract, ContractDocument, Customer, CustomerDocument, Service, ServiceDocument};
use crate::database::postgres::insert;
use crate::database::{ConnectionManager, DatabaseError, Store};

use super::dataset::TelcoRecord;
use super::schema::{ensure_document_indexes, COLLECTIONS};
use super::IngestError;

async fn insert_row(conn: &mut PgConnection, record: &TelcoRecord) -> Result<(), DatabaseError> {
    let customer = insert::<Customer>(conn, record.new_customer()).await?;
    insert::<Contract>(conn, record.new_contract(customer.customer_id)).await?;
    insert::<Service>(conn, record.new_service(customer.customer_id)).await?;
    Ok(())
}

/// Insert each record's customer, contract and service in one scoped cursor per row
pub async fn load_relational(db: &ConnectionManager, records: &[TelcoRecord]) -> Result<usize, IngestError> {
    for record in records {
        let mut cursor = db.scoped_cursor().await?;
        let result = insert_row(cursor.conn(), record).await;
        cursor.complete(result).await?;
        db.record_write(Store::Relational);
    }
    info!("Inserted {} records into PostgreSQL", records.len());
    Ok(records.len())
}

/// Replace the three collections with the dataset contents
pub async fn load_documents(db: &ConnectionManager, records: &[TelcoRecord]) -> Result<usize, IngestError> {
    for name in COLLECTIONS {
        db.collection::<Document>(name).drop(None).await?;
    }

    if !records.is_empty() {
        db.collection::<CustomerDocument>(COLLECTIONS[0])
            .insert_many(records.iter().map(TelcoRecord::customer_document), None)
            .await?;
        db.collection::<ContractDocument>(COLLECTIONS[1])
            .insert_many(records.iter().map(TelcoRecord::contract_document), None)
            .await?;
        db.collection::<ServiceDocument>(COLLECTIONS[2])
            .insert_many(records.iter().map(TelcoRecord::service_document), None)
            .await?;
        db.record_write(Store::Document);
    }

    ensure_document_indexes(db).await?;
    info!("Inserted {} records into MongoDB collections", records.len());
    Ok(records.len())
}
