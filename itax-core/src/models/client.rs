use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TaxpayerInput;

/// A saved client and the inputs last entered for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: i64,
    pub name: String,
    pub input: TaxpayerInput,
    pub created_at: DateTime<Utc>,
}

/// For saving new clients (no id or timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClientRecord {
    pub name: String,
    pub input: TaxpayerInput,
}
