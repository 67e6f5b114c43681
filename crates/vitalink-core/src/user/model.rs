//! User domain models.

use serde::{Deserialize, Serialize};
use vitalink_store::{HealthPatch, UserRow};

/// A registered user as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub data: UserData,
    pub created_at: String,
    pub updated_at: String,
}

/// Personal fields plus the last-known vitals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub contact_number: String,
    pub gender: String,
    pub health_status: HealthStatus,
}

/// Last-known vitals. All fields start out null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(rename = "heartRate")]
    pub heart_rate: Option<f64>,
    #[serde(rename = "SpO2")]
    pub spo2: Option<f64>,
    pub weight: Option<f64>,
}

/// Registration body. Every field is required; `Option` lets validation
/// report all missing fields at once instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Forms submit age as either a number or a numeric string.
    pub age: Option<serde_json::Value>,
    pub contact_number: Option<String>,
    pub gender: Option<String>,
}

/// Partial health-status update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthUpdate {
    #[serde(rename = "heartRate")]
    pub heart_rate: Option<f64>,
    #[serde(rename = "SpO2")]
    pub spo2: Option<f64>,
    pub weight: Option<f64>,
}

impl HealthUpdate {
    pub fn is_empty(&self) -> bool {
        self.heart_rate.is_none() && self.spo2.is_none() && self.weight.is_none()
    }

    /// Store-level patch carrying the same fields.
    pub fn to_patch(&self) -> HealthPatch {
        HealthPatch {
            heart_rate: self.heart_rate,
            spo2: self.spo2,
            weight: self.weight,
        }
    }
}

impl UserRecord {
    /// Create from a store row.
    pub fn from_row(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            data: UserData {
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                age: row.age,
                contact_number: row.contact_number,
                gender: row.gender,
                health_status: HealthStatus {
                    heart_rate: row.heart_rate,
                    spo2: row.spo2,
                    weight: row.weight,
                },
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    /// Flatten into a store row.
    pub fn to_row(&self) -> UserRow {
        UserRow {
            user_id: self.user_id.clone(),
            first_name: self.data.first_name.clone(),
            last_name: self.data.last_name.clone(),
            email: self.data.email.clone(),
            age: self.data.age,
            contact_number: self.data.contact_number.clone(),
            gender: self.data.gender.clone(),
            heart_rate: self.data.health_status.heart_rate,
            spo2: self.data.health_status.spo2,
            weight: self.data.health_status.weight,
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}
