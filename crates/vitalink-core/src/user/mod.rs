//! User registry: registration, lookup and health-status updates.

pub mod model;

use chrono::Utc;
use model::{HealthStatus, HealthUpdate, NewUser, UserData, UserRecord};
use tracing::info;
use uuid::Uuid;
use vitalink_store::{StoreError, UserStore};

use crate::error::{VitalError, VitalResult};

/// Upper bound accepted for a registrant's age.
pub const MAX_AGE: u32 = 120;

/// Register a new user with an empty health status.
pub async fn register_user(store: &dyn UserStore, input: NewUser) -> VitalResult<UserRecord> {
    let now = Utc::now().to_rfc3339();
    let record = UserRecord {
        user_id: Uuid::new_v4().to_string(),
        data: validate_new_user(input)?,
        created_at: now.clone(),
        updated_at: now,
    };

    store.create_user(&record.to_row()).await?;
    info!(user_id = %record.user_id, "User registered");

    Ok(record)
}

/// Get a user by ID.
pub async fn get_user(store: &dyn UserStore, user_id: &str) -> VitalResult<UserRecord> {
    let row = store
        .get_user(user_id)
        .await
        .map_err(|e| not_found_as_user(e, user_id))?;
    Ok(UserRecord::from_row(row))
}

/// List all users in registration order.
pub async fn list_users(store: &dyn UserStore) -> VitalResult<Vec<UserRecord>> {
    let rows = store.list_users().await?;
    Ok(rows.into_iter().map(UserRecord::from_row).collect())
}

/// Merge a partial update into a user's health status.
///
/// Provided fields overwrite, missing ones keep their stored value. The merge
/// happens inside the store, so concurrent updates to different fields all
/// land. An empty update leaves the record untouched.
pub async fn update_health_status(
    store: &dyn UserStore,
    user_id: &str,
    update: HealthUpdate,
) -> VitalResult<UserRecord> {
    if update.is_empty() {
        return get_user(store, user_id).await;
    }

    let row = store
        .merge_health(user_id, &update.to_patch(), &Utc::now().to_rfc3339())
        .await
        .map_err(|e| not_found_as_user(e, user_id))?;
    info!(user_id = %user_id, "Health status updated");

    Ok(UserRecord::from_row(row))
}

fn not_found_as_user(err: StoreError, user_id: &str) -> VitalError {
    match err {
        StoreError::NotFound(_) => VitalError::UserNotFound(user_id.to_string()),
        other => VitalError::Store(other),
    }
}

fn validate_new_user(input: NewUser) -> VitalResult<UserData> {
    fn present(value: Option<String>) -> Option<String> {
        value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    let first_name = present(input.first_name);
    let last_name = present(input.last_name);
    let email = present(input.email);
    let contact_number = present(input.contact_number);
    let gender = present(input.gender);
    let age = input.age.filter(|v| match v {
        serde_json::Value::Null => false,
        serde_json::Value::String(s) => !s.trim().is_empty(),
        _ => true,
    });

    let missing: Vec<&str> = [
        ("firstName", first_name.is_none()),
        ("lastName", last_name.is_none()),
        ("email", email.is_none()),
        ("age", age.is_none()),
        ("contactNumber", contact_number.is_none()),
        ("gender", gender.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();

    match (first_name, last_name, email, age, contact_number, gender) {
        (Some(first_name), Some(last_name), Some(email), Some(age), Some(contact_number), Some(gender)) => {
            if !email.contains('@') {
                return Err(VitalError::validation(format!("Invalid email address: {}", email)));
            }
            Ok(UserData {
                first_name,
                last_name,
                email,
                age: parse_age(&age)?,
                contact_number,
                gender,
                health_status: HealthStatus::default(),
            })
        }
        _ => Err(VitalError::validation(format!(
            "All fields are required. Missing: {}",
            missing.join(", ")
        ))),
    }
}

fn parse_age(value: &serde_json::Value) -> VitalResult<u32> {
    let age = match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };

    match age {
        Some(age) if age <= MAX_AGE => Ok(age),
        _ => Err(VitalError::validation(format!(
            "Age must be a whole number between 0 and {}",
            MAX_AGE
        ))),
    }
}
