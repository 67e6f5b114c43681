//! User record queries — Redis implementation.
//!
//! Each record is a hash `vitalink:user:{id}` with the JSON row in field
//! `data`. The sorted set `vitalink:users:all` indexes ids by creation time.

use crate::client::{RedisPool, StoreError, StoreResult};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::warn;

const USERS_INDEX: &str = "vitalink:users:all";

/// Merges vitals into the stored row in one server-side step.
/// ARGV: heart_rate, spo2, weight ('' = keep), updated_at.
const MERGE_HEALTH_SCRIPT: &str = r#"
local json = redis.call('HGET', KEYS[1], 'data')
if not json then
    return false
end
local row = cjson.decode(json)
if ARGV[1] ~= '' then row['heart_rate'] = tonumber(ARGV[1]) end
if ARGV[2] ~= '' then row['spo2'] = tonumber(ARGV[2]) end
if ARGV[3] ~= '' then row['weight'] = tonumber(ARGV[3]) end
row['updated_at'] = ARGV[4]
local updated = cjson.encode(row)
redis.call('HSET', KEYS[1], 'data', updated)
return updated
"#;

/// Flat persisted form of a registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub contact_number: String,
    pub gender: String,
    pub heart_rate: Option<f64>,
    pub spo2: Option<f64>,
    pub weight: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Vitals to overwrite on a stored user. `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HealthPatch {
    pub heart_rate: Option<f64>,
    pub spo2: Option<f64>,
    pub weight: Option<f64>,
}

impl HealthPatch {
    pub fn apply(&self, row: &mut UserRow, updated_at: &str) {
        if let Some(v) = self.heart_rate {
            row.heart_rate = Some(v);
        }
        if let Some(v) = self.spo2 {
            row.spo2 = Some(v);
        }
        if let Some(v) = self.weight {
            row.weight = Some(v);
        }
        row.updated_at = updated_at.to_string();
    }

    fn script_args(&self) -> [String; 3] {
        let arg = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        [arg(self.heart_rate), arg(self.spo2), arg(self.weight)]
    }
}

fn user_key(user_id: &str) -> String {
    format!("vitalink:user:{}", user_id)
}

fn not_found(user_id: &str) -> StoreError {
    StoreError::NotFound(format!("User not found: {}", user_id))
}

/// Decode index entries, skipping ids whose record is gone or unreadable.
fn decode_rows(entries: Vec<(String, Option<String>)>) -> Vec<UserRow> {
    entries
        .into_iter()
        .filter_map(|(id, json)| {
            let json = json?;
            serde_json::from_str::<UserRow>(&json)
                .map_err(|e| warn!(user_id = %id, error = %e, "Skipping unreadable user record"))
                .ok()
        })
        .collect()
}

pub async fn create_user(pool: &RedisPool, row: &UserRow) -> StoreResult<()> {
    let mut conn = pool.clone();
    conn.hset::<_, _, _, ()>(user_key(&row.user_id), "data", serde_json::to_string(row)?)
        .await?;

    let score = chrono::Utc::now().timestamp_millis();
    conn.zadd::<_, _, _, ()>(USERS_INDEX, &row.user_id, score).await?;

    Ok(())
}

pub async fn get_user(pool: &RedisPool, user_id: &str) -> StoreResult<UserRow> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.hget(user_key(user_id), "data").await?;
    match json {
        Some(j) => Ok(serde_json::from_str(&j)?),
        None => Err(not_found(user_id)),
    }
}

/// Apply `patch` to a stored user atomically and return the merged row.
pub async fn merge_health(
    pool: &RedisPool,
    user_id: &str,
    patch: &HealthPatch,
    updated_at: &str,
) -> StoreResult<UserRow> {
    let mut conn = pool.clone();
    let [heart_rate, spo2, weight] = patch.script_args();
    let script = redis::Script::new(MERGE_HEALTH_SCRIPT);
    let mut invocation = script.key(user_key(user_id));
    invocation.arg(heart_rate).arg(spo2).arg(weight).arg(updated_at);
    let json: Option<String> = invocation.invoke_async(&mut conn).await?;

    match json {
        Some(j) => Ok(serde_json::from_str(&j)?),
        None => Err(not_found(user_id)),
    }
}

pub async fn list_users(pool: &RedisPool) -> StoreResult<Vec<UserRow>> {
    let mut conn = pool.clone();
    let ids: Vec<String> = conn.zrange(USERS_INDEX, 0, -1).await?;
    let mut entries = Vec::with_capacity(ids.len());
    for id in ids {
        let json: Option<String> = conn.hget(user_key(&id), "data").await?;
        entries.push((id, json));
    }
    Ok(decode_rows(entries))
}
