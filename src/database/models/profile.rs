use serde::Serialize;

use super::{ContractDocument, CustomerDocument, ServiceDocument};

/// Customer, contract and service documents for one `customerID`.
///
/// Read with three independent queries, so the slots are not a consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerProfile {
    pub customer: CustomerDocument,
    pub contract: Option<ContractDocument>,
    pub service: Option<ServiceDocument>,
}
