use mongodb::bson::oid::ObjectId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::resolver::{Field, FieldSet};

/// Row in the `contracts` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub contract_id: i32,
    pub customer_id: i32,
    pub contract_type: String,
    pub paperless_billing: bool,
    pub payment_method: String,
    pub monthly_charges: Decimal,
    pub total_charges: Decimal,
    pub churn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContract {
    pub customer_id: i32,
    pub contract_type: String,
    pub paperless_billing: bool,
    pub payment_method: String,
    pub monthly_charges: Decimal,
    pub total_charges: Decimal,
    pub churn: bool,
}

/// The owning customer is fixed at creation and cannot be patched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractPatch {
    pub contract_type: Option<String>,
    pub paperless_billing: Option<bool>,
    pub payment_method: Option<String>,
    pub monthly_charges: Option<Decimal>,
    pub total_charges: Option<Decimal>,
    pub churn: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractField {
    ContractType,
    PaperlessBilling,
    PaymentMethod,
    MonthlyCharges,
    TotalCharges,
    Churn,
}

impl Field for ContractField {
    fn column(self) -> &'static str {
        match self {
            ContractField::ContractType => "contract_type",
            ContractField::PaperlessBilling => "paperless_billing",
            ContractField::PaymentMethod => "payment_method",
            ContractField::MonthlyCharges => "monthly_charges",
            ContractField::TotalCharges => "total_charges",
            ContractField::Churn => "churn",
        }
    }

    fn key(self) -> &'static str {
        match self {
            ContractField::ContractType => "Contract",
            ContractField::PaperlessBilling => "PaperlessBilling",
            ContractField::PaymentMethod => "PaymentMethod",
            ContractField::MonthlyCharges => "MonthlyCharges",
            ContractField::TotalCharges => "TotalCharges",
            ContractField::Churn => "Churn",
        }
    }
}

impl ContractPatch {
    pub fn into_field_set(self) -> FieldSet<ContractField> {
        FieldSet::new()
            .set(ContractField::ContractType, self.contract_type)
            .set(ContractField::PaperlessBilling, self.paperless_billing)
            .set(ContractField::PaymentMethod, self.payment_method)
            .set(ContractField::MonthlyCharges, self.monthly_charges)
            .set(ContractField::TotalCharges, self.total_charges)
            .set(ContractField::Churn, self.churn)
    }
}

/// Document in the `contracts` collection; at most one per `customerID`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDocument {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::object_id_as_hex"
    )]
    pub id: Option<ObjectId>,
    #[serde(rename = "customerID")]
    pub customer_id: String,
    #[serde(rename = "Contract")]
    pub contract_type: String,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: bool,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
    #[serde(rename = "Churn")]
    pub churn: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractDocumentPatch {
    #[serde(rename = "Contract")]
    pub contract_type: Option<String>,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: Option<bool>,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: Option<String>,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: Option<f64>,
    #[serde(rename = "TotalCharges")]
    pub total_charges: Option<f64>,
    #[serde(rename = "Churn")]
    pub churn: Option<bool>,
}

impl ContractDocumentPatch {
    pub fn into_field_set(self) -> FieldSet<ContractField> {
        FieldSet::new()
            .set(ContractField::ContractType, self.contract_type)
            .set(ContractField::PaperlessBilling, self.paperless_billing)
            .set(ContractField::PaymentMethod, self.payment_method)
            .set(ContractField::MonthlyCharges, self.monthly_charges)
            .set(ContractField::TotalCharges, self.total_charges)
            .set(ContractField::Churn, self.churn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::resolver::FieldValue;
    use mongodb::bson::doc;
    use serde_json::json;

    #[test]
    fn charges_serialize_as_numbers() {
        let contract = Contract {
            contract_id: 1,
            customer_id: 9,
            contract_type: "Two year".into(),
            paperless_billing: true,
            payment_method: "Bank transfer (automatic)".into(),
            monthly_charges: Decimal::new(8990, 2),
            total_charges: Decimal::new(240000, 2),
            churn: false,
        };
        let value = serde_json::to_value(&contract).unwrap();
        assert_eq!(value["monthly_charges"], json!(89.9));
        assert_eq!(value["total_charges"], json!(2400.0));
    }

    #[test]
    fn new_contract_accepts_numeric_charges() {
        let contract: NewContract = serde_json::from_value(json!({
            "customer_id": 3,
            "contract_type": "Month-to-month",
            "paperless_billing": true,
            "payment_method": "Electronic check",
            "monthly_charges": 29.85,
            "total_charges": 29.85,
            "churn": false
        }))
        .unwrap();
        assert_eq!(contract.monthly_charges, Decimal::new(2985, 2));
    }

    #[test]
    fn patch_cannot_move_contract_to_another_customer() {
        assert!(serde_json::from_value::<ContractPatch>(json!({ "customer_id": 4 })).is_err());
    }

    #[test]
    fn relational_and_document_patches_share_fields() {
        let relational = ContractPatch {
            churn: Some(true),
            monthly_charges: Some(Decimal::new(5000, 2)),
            ..Default::default()
        }
        .into_field_set();
        assert_eq!(
            relational.fields().collect::<Vec<_>>(),
            vec![ContractField::MonthlyCharges, ContractField::Churn]
        );
        assert_eq!(
            relational.get(ContractField::MonthlyCharges),
            Some(&FieldValue::Decimal(Decimal::new(5000, 2)))
        );

        let document: ContractDocumentPatch =
            serde_json::from_value(json!({ "Churn": true, "MonthlyCharges": 50.0 })).unwrap();
        assert_eq!(
            document.into_field_set().set_document().unwrap(),
            doc! { "$set": { "MonthlyCharges": 50.0, "Churn": true } }
        );
    }
}
