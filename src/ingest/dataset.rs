use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::database::models::{
    ContractDocument, CustomerDocument, NewContract, NewCustomer, NewService, ServiceDocument,
};

use crate::database::resolver::decimal_to_f64;

use super::IngestError;

/// One line of the Telco CSV, as written by the dataset publisher
#[derive(Debug, Deserialize)]
struct TelcoRow {
    #[serde(rename = "customerID")]
    customer_id: String,
    gender: String,
    #[serde(rename = "SeniorCitizen")]
    senior_citizen: String,
    #[serde(rename = "Partner")]
    partner: String,
    #[serde(rename = "Dependents")]
    dependents: String,
    tenure: i32,
    #[serde(rename = "PhoneService")]
    phone_service: String,
    #[serde(rename = "InternetService")]
    internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    online_security: String,
    #[serde(rename = "OnlineBackup")]
    online_backup: String,
    #[serde(rename = "DeviceProtection")]
    device_protection: String,
    #[serde(rename = "TechSupport")]
    tech_support: String,
    #[serde(rename = "StreamingTV")]
    streaming_tv: String,
    #[serde(rename = "StreamingMovies")]
    streaming_movies: String,
    #[serde(rename = "Contract")]
    contract: String,
    #[serde(rename = "PaperlessBilling")]
    paperless_billing: String,
    #[serde(rename = "PaymentMethod")]
    payment_method: String,
    #[serde(rename = "MonthlyCharges")]
    monthly_charges: String,
    #[serde(rename = "TotalCharges")]
    total_charges: String,
    #[serde(rename = "Churn")]
    churn: String,
}

/// A cleaned dataset row, ready to be split into the three entities
#[derive(Debug, Clone, PartialEq)]
pub struct TelcoRecord {
    pub customer_id: String,
    pub gender: String,
    pub senior_citizen: bool,
    pub partner: bool,
    pub dependents: bool,
    pub tenure: i32,
    pub phone_service: bool,
    pub internet_service: String,
    pub online_security: String,
    pub online_backup: String,
    pub device_protection: String,
    pub tech_support: String,
    pub streaming_tv: String,
    pub streaming_movies: String,
    pub contract_type: String,
    pub paperless_billing: bool,
    pub payment_method: String,
    pub monthly_charges: Decimal,
    pub total_charges: Decimal,
    pub churn: bool,
}

#[derive(Debug, Default)]
pub struct Dataset {
    pub records: Vec<TelcoRecord>,
    /// Rows skipped because a charge column did not parse
    pub dropped: usize,
}

fn yes(value: &str) -> bool {
    value.trim() == "Yes"
}

fn charge(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim()).ok().map(|d| d.round_dp(2))
}

impl TelcoRow {
    fn clean(self) -> Option<TelcoRecord> {
        let monthly_charges = charge(&self.monthly_charges)?;
        let total_charges = charge(&self.total_charges)?;
        let senior_citizen = self.senior_citizen.trim().parse::<i32>().ok()? != 0;

        Some(TelcoRecord {
            customer_id: self.customer_id,
            gender: self.gender,
            senior_citizen,
            partner: yes(&self.partner),
            dependents: yes(&self.dependents),
            tenure: self.tenure,
            phone_service: yes(&self.phone_service),
            internet_service: self.internet_service,
            online_security: self.online_security,
            online_backup: self.online_backup,
            device_protection: self.device_protection,
            tech_support: self.tech_support,
            streaming_tv: self.streaming_tv,
            streaming_movies: self.streaming_movies,
            contract_type: self.contract,
            paperless_billing: yes(&self.paperless_billing),
            payment_method: self.payment_method,
            monthly_charges,
            total_charges,
            churn: yes(&self.churn),
        })
    }
}

impl TelcoRecord {
    pub fn customer_name(&self) -> String {
        format!("Customer_{}", self.customer_id)
    }

    pub fn new_customer(&self) -> NewCustomer {
        NewCustomer {
            customer_name: self.customer_name(),
            gender: self.gender.clone(),
            senior_citizen: self.senior_citizen,
            partner: self.partner,
            dependents: self.dependents,
            tenure: self.tenure,
            phone_service: self.phone_service,
        }
    }

    pub fn new_contract(&self, customer_id: i32) -> NewContract {
        NewContract {
            customer_id,
            contract_type: self.contract_type.clone(),
            paperless_billing: self.paperless_billing,
            payment_method: self.payment_method.clone(),
            monthly_charges: self.monthly_charges,
            total_charges: self.total_charges,
            churn: self.churn,
        }
    }

    pub fn new_service(&self, customer_id: i32) -> NewService {
        NewService {
            customer_id,
            internet_service: self.internet_service.clone(),
            online_security: self.online_security.clone(),
            online_backup: self.online_backup.clone(),
            device_protection: self.device_protection.clone(),
            tech_support: self.tech_support.clone(),
            streaming_tv: self.streaming_tv.clone(),
            streaming_movies: self.streaming_movies.clone(),
        }
    }

    pub fn customer_document(&self) -> CustomerDocument {
        CustomerDocument {
            id: None,
            customer_id: self.customer_id.clone(),
            customer_name: self.customer_name(),
            gender: self.gender.clone(),
            senior_citizen: self.senior_citizen,
            partner: self.partner,
            dependents: self.dependents,
            tenure: self.tenure,
            phone_service: self.phone_service,
        }
    }

    pub fn contract_document(&self) -> ContractDocument {
        ContractDocument {
            id: None,
            customer_id: self.customer_id.clone(),
            contract_type: self.contract_type.clone(),
            paperless_billing: self.paperless_billing,
            payment_method: self.payment_method.clone(),
            monthly_charges: decimal_to_f64(self.monthly_charges),
            total_charges: decimal_to_f64(self.total_charges),
            churn: self.churn,
        }
    }

    pub fn service_document(&self) -> ServiceDocument {
        ServiceDocument {
            id: None,
            customer_id: self.customer_id.clone(),
            internet_service: self.internet_service.clone(),
            online_security: self.online_security.clone(),
            online_backup: self.online_backup.clone(),
            device_protection: self.device_protection.clone(),
            tech_support: self.tech_support.clone(),
            streaming_tv: self.streaming_tv.clone(),
            streaming_movies: self.streaming_movies.clone(),
        }
    }
}

/// Parse Telco CSV from any reader, dropping rows with unparsable charges
pub fn parse_dataset<R: Read>(reader: R) -> Result<Dataset, IngestError> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut dataset = Dataset::default();

    for row in csv.deserialize::<TelcoRow>() {
        let row = row?;
        let id = row.customer_id.clone();
        match row.clean() {
            Some(record) => dataset.records.push(record),
            None => {
                debug!("Dropping row {}: unparsable charges", id);
                dataset.dropped += 1;
            }
        }
    }

    Ok(dataset)
}

pub fn read_dataset(path: &Path) -> Result<Dataset, IngestError> {
    let file = std::fs::File::open(path)?;
    let dataset = parse_dataset(file)?;
    info!(
        "Read {} records from {} ({} dropped)",
        dataset.records.len(),
        path.display(),
        dataset.dropped
    );
    Ok(dataset)
}

/// Download a Telco CSV to `output`, returning its data row count
pub async fn fetch_dataset(url: &str, output: &Path) -> Result<usize, IngestError> {
    info!("Downloading dataset from {}", url);
    let body = reqwest::get(url).await?.error_for_status()?.bytes().await?;

    let mut reader = csv::Reader::from_reader(body.as_ref());
    if !reader.headers()?.iter().any(|h| h == "customerID") {
        return Err(IngestError::InvalidDataset {
            message: "header has no customerID column".to_string(),
        });
    }
    let mut rows = 0;
    for record in reader.records() {
        record?;
        rows += 1;
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, &body)?;
    info!("Saved {} rows to {}", rows, output.display());
    Ok(rows)
}
