//! # Redis
//!
//! The shared counts table lives in Redis as one record: a single key
//! holding the entire table serialized as JSON.
//!
//! ## Contract
//!
//! - The store offers get/put on that one record, nothing more. No
//!   per-field updates, no transactions, no versioning.
//! - Reads are fail-soft: a missing, unreachable, or unreadable record
//!   degrades to an empty table. History is lost, requests are not.
//! - Writes replace the whole record. A failed write is logged by the
//!   caller and the in-flight response still succeeds.

use std::{collections::HashMap, time::Duration};

use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tracing::warn;

use crate::error::AppError;

/// The one record holding the entire counts table.
pub const STATS_KEY: &str = "stats";

/// Normalized keyword to occurrence count.
pub type CountsTable = HashMap<String, u64>;

pub async fn init_redis(redis_url: &str) -> ConnectionManager {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url).unwrap();

    client
        .get_connection_manager_with_config(config)
        .await
        .unwrap()
}

/// Decodes a stored blob. Absent or malformed content degrades to an empty
/// table instead of failing the caller.
pub fn parse_table(payload: Option<String>) -> CountsTable {
    match payload {
        Some(payload) => match serde_json::from_str(&payload) {
            Ok(table) => table,
            Err(e) => {
                warn!("Stored stats unreadable, falling back to empty table: {e}");
                CountsTable::new()
            }
        },
        None => CountsTable::new(),
    }
}

pub fn serialize_table(table: &CountsTable) -> Result<String, AppError> {
    serde_json::to_string(table).map_err(|e| AppError::Internal(e.into()))
}

pub async fn load_table(connection: &mut ConnectionManager) -> CountsTable {
    match connection.get::<_, Option<String>>(STATS_KEY).await {
        Ok(payload) => parse_table(payload),
        Err(e) => {
            warn!("Failed to read stats from Redis, falling back to empty table: {e}");
            CountsTable::new()
        }
    }
}

pub async fn save_table(
    connection: &mut ConnectionManager,
    table: &CountsTable,
) -> Result<(), AppError> {
    let payload = serialize_table(table)?;

    connection
        .set::<_, _, ()>(STATS_KEY, payload)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(())
}
