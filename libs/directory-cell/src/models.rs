// libs/directory-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hospital row as stored in the `hospital` table. Rows are immutable
/// once fetched; the wizard only ever holds references to them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hospital {
    pub id: i64,
    /// External hospital code, the key doctors are attached to.
    pub hospital_id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub speciality: String,
    #[serde(default)]
    pub qualification: Option<String>,
    /// Display string, e.g. "₹ 300"; the store keeps it as text.
    #[serde(default)]
    pub consultation_fee: Option<String>,
    /// Code of the owning hospital.
    pub hospital_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
