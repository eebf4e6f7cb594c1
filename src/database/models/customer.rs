use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::resolver::{Field, FieldSet};

/// Row in the `customers` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub customer_id: i32,
    pub customer_name: String,
    pub gender: String,
    pub senior_citizen: bool,
    pub partner: bool,
    pub dependents: bool,
    pub tenure: i32,
    pub phone_service: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub customer_name: String,
    pub gender: String,
    pub senior_citizen: bool,
    pub partner: bool,
    pub dependents: bool,
    pub tenure: i32,
    pub phone_service: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerPatch {
    pub customer_name: Option<String>,
    pub gender: Option<String>,
    pub senior_citizen: Option<bool>,
    pub partner: Option<bool>,
    pub dependents: Option<bool>,
    pub tenure: Option<i32>,
    pub phone_service: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    CustomerName,
    Gender,
    SeniorCitizen,
    Partner,
    Dependents,
    Tenure,
    PhoneService,
}

impl Field for CustomerField {
    fn column(self) -> &'static str {
        match self {
            CustomerField::CustomerName => "customer_name",
            CustomerField::Gender => "gender",
            CustomerField::SeniorCitizen => "senior_citizen",
            CustomerField::Partner => "partner",
            CustomerField::Dependents => "dependents",
            CustomerField::Tenure => "tenure",
            CustomerField::PhoneService => "phone_service",
        }
    }

    fn key(self) -> &'static str {
        match self {
            CustomerField::CustomerName => "customer_name",
            CustomerField::Gender => "gender",
            CustomerField::SeniorCitizen => "SeniorCitizen",
            CustomerField::Partner => "Partner",
            CustomerField::Dependents => "Dependents",
            CustomerField::Tenure => "tenure",
            CustomerField::PhoneService => "PhoneService",
        }
    }
}

impl CustomerPatch {
    pub fn into_field_set(self) -> FieldSet<CustomerField> {
        FieldSet::new()
            .set(CustomerField::CustomerName, self.customer_name)
            .set(CustomerField::Gender, self.gender)
            .set(CustomerField::SeniorCitizen, self.senior_citizen)
            .set(CustomerField::Partner, self.partner)
            .set(CustomerField::Dependents, self.dependents)
            .set(CustomerField::Tenure, self.tenure)
            .set(CustomerField::PhoneService, self.phone_service)
    }
}

/// Document in the `customers` collection, keyed by the dataset's `customerID`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDocument {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::object_id_as_hex"
    )]
    pub id: Option<ObjectId>,
    #[serde(rename = "customerID")]
    pub customer_id: String,
    pub customer_name: String,
    pub gender: String,
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: bool,
    #[serde(rename = "Partner")]
    pub partner: bool,
    #[serde(rename = "Dependents")]
    pub dependents: bool,
    pub tenure: i32,
    #[serde(rename = "PhoneService")]
    pub phone_service: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerDocumentPatch {
    pub customer_name: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: Option<bool>,
    #[serde(rename = "Partner")]
    pub partner: Option<bool>,
    #[serde(rename = "Dependents")]
    pub dependents: Option<bool>,
    pub tenure: Option<i32>,
    #[serde(rename = "PhoneService")]
    pub phone_service: Option<bool>,
}

impl CustomerDocumentPatch {
    pub fn into_field_set(self) -> FieldSet<CustomerField> {
        CustomerPatch {
            customer_name: self.customer_name,
            gender: self.gender,
            senior_citizen: self.senior_citizen,
            partner: self.partner,
            dependents: self.dependents,
            tenure: self.tenure,
            phone_service: self.phone_service,
        }
        .into_field_set()
    }
}

/// Equality criteria for the customer document search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerSearch {
    pub gender: Option<String>,
    pub senior_citizen: Option<bool>,
    pub partner: Option<bool>,
    pub dependents: Option<bool>,
    pub phone_service: Option<bool>,
    pub tenure: Option<i32>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl CustomerSearch {
    /// Blank strings are treated as "no criterion"
    pub fn criteria(&self) -> FieldSet<CustomerField> {
        FieldSet::new()
            .set(CustomerField::Gender, self.gender.clone().filter(|g| !g.is_empty()))
            .set(CustomerField::SeniorCitizen, self.senior_citizen)
            .set(CustomerField::Partner, self.partner)
            .set(CustomerField::Dependents, self.dependents)
            .set(CustomerField::PhoneService, self.phone_service)
            .set(CustomerField::Tenure, self.tenure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::resolver::FieldValue;
    use mongodb::bson::doc;
    use serde_json::json;

    #[test]
    fn tenure_only_patch_touches_one_column() {
        let patch: CustomerPatch = serde_json::from_value(json!({ "tenure": 24 })).unwrap();
        let set = patch.into_field_set();
        assert_eq!(set.fields().collect::<Vec<_>>(), vec![CustomerField::Tenure]);
        assert_eq!(set.get(CustomerField::Tenure), Some(&FieldValue::Int(24)));
    }

    #[test]
    fn null_fields_count_as_unset() {
        let patch: CustomerPatch =
            serde_json::from_value(json!({ "customer_name": null, "gender": null })).unwrap();
        assert!(patch.into_field_set().is_empty());
    }

    #[test]
    fn unknown_patch_fields_are_rejected() {
        let err = serde_json::from_value::<CustomerPatch>(json!({ "customer_id": 7 })).unwrap_err();
        assert!(err.to_string().contains("unknown field"), "{}", err);

        let err = serde_json::from_value::<CustomerDocumentPatch>(json!({ "customerID": "X" })).unwrap_err();
        assert!(err.to_string().contains("unknown field"), "{}", err);
    }

    #[test]
    fn document_patch_uses_dataset_keys() {
        let patch: CustomerDocumentPatch =
            serde_json::from_value(json!({ "SeniorCitizen": true, "tenure": 3 })).unwrap();
        assert_eq!(
            patch.into_field_set().set_document().unwrap(),
            doc! { "$set": { "SeniorCitizen": true, "tenure": 3 } }
        );
    }

    #[test]
    fn document_json_renders_object_id_as_hex() {
        let oid = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();
        let customer = CustomerDocument {
            id: Some(oid),
            customer_id: "7590-VHVEG".into(),
            customer_name: "Customer_7590-VHVEG".into(),
            gender: "Female".into(),
            senior_citizen: false,
            partner: true,
            dependents: false,
            tenure: 1,
            phone_service: false,
        };
        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["_id"], json!("65a1b2c3d4e5f60718293a4b"));
        assert_eq!(value["customerID"], json!("7590-VHVEG"));
        assert_eq!(value["SeniorCitizen"], json!(false));
    }

    #[test]
    fn search_skips_blank_gender() {
        let search = CustomerSearch {
            gender: Some(String::new()),
            partner: Some(true),
            ..Default::default()
        };
        assert_eq!(search.criteria().to_document(), doc! { "Partner": true });
    }
}
