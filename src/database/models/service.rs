use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::resolver::{Field, FieldSet};

/// Row in the `services` table: the add-on services a customer subscribes to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub service_id: i32,
    pub customer_id: i32,
    pub internet_service: String,
    pub online_security: String,
    pub online_backup: String,
    pub device_protection: String,
    pub tech_support: String,
    pub streaming_tv: String,
    pub streaming_movies: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewService {
    pub customer_id: i32,
    pub internet_service: String,
    pub online_security: String,
    pub online_backup: String,
    pub device_protection: String,
    pub tech_support: String,
    pub streaming_tv: String,
    pub streaming_movies: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServicePatch {
    pub internet_service: Option<String>,
    pub online_security: Option<String>,
    pub online_backup: Option<String>,
    pub device_protection: Option<String>,
    pub tech_support: Option<String>,
    pub streaming_tv: Option<String>,
    pub streaming_movies: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceField {
    InternetService,
    OnlineSecurity,
    OnlineBackup,
    DeviceProtection,
    TechSupport,
    StreamingTv,
    StreamingMovies,
}

impl Field for ServiceField {
    fn column(self) -> &'static str {
        match self {
            ServiceField::InternetService => "internet_service",
            ServiceField::OnlineSecurity => "online_security",
            ServiceField::OnlineBackup => "online_backup",
            ServiceField::DeviceProtection => "device_protection",
            ServiceField::TechSupport => "tech_support",
            ServiceField::StreamingTv => "streaming_tv",
            ServiceField::StreamingMovies => "streaming_movies",
        }
    }

    fn key(self) -> &'static str {
        match self {
            ServiceField::InternetService => "InternetService",
            ServiceField::OnlineSecurity => "OnlineSecurity",
            ServiceField::OnlineBackup => "OnlineBackup",
            ServiceField::DeviceProtection => "DeviceProtection",
            ServiceField::TechSupport => "TechSupport",
            ServiceField::StreamingTv => "StreamingTV",
            ServiceField::StreamingMovies => "StreamingMovies",
        }
    }
}

impl ServicePatch {
    pub fn into_field_set(self) -> FieldSet<ServiceField> {
        FieldSet::new()
            .set(ServiceField::InternetService, self.internet_service)
            .set(ServiceField::OnlineSecurity, self.online_security)
            .set(ServiceField::OnlineBackup, self.online_backup)
            .set(ServiceField::DeviceProtection, self.device_protection)
            .set(ServiceField::TechSupport, self.tech_support)
            .set(ServiceField::StreamingTv, self.streaming_tv)
            .set(ServiceField::StreamingMovies, self.streaming_movies)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDocument {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::object_id_as_hex"
    )]
    pub id: Option<ObjectId>,
    #[serde(rename = "customerID")]
    pub customer_id: String,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: String,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: String,
    #[serde(rename = "DeviceProtection")]
    pub device_protection: String,
    #[serde(rename = "TechSupport")]
    pub tech_support: String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: String,
    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDocumentPatch {
    #[serde(rename = "InternetService")]
    pub internet_service: Option<String>,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: Option<String>,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: Option<String>,
    #[serde(rename = "DeviceProtection")]
    pub device_protection: Option<String>,
    #[serde(rename = "TechSupport")]
    pub tech_support: Option<String>,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: Option<String>,
    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: Option<String>,
}

impl ServiceDocumentPatch {
    pub fn into_field_set(self) -> FieldSet<ServiceField> {
        ServicePatch {
            internet_service: self.internet_service,
            online_security: self.online_security,
            online_backup: self.online_backup,
            device_protection: self.device_protection,
            tech_support: self.tech_support,
            streaming_tv: self.streaming_tv,
            streaming_movies: self.streaming_movies,
        }
        .into_field_set()
    }
}
