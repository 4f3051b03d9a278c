pub mod repository_error;
pub mod mongo_store;
pub mod material_repo;
pub mod quote_repo;

use chrono::{SecondsFormat, Utc};

/// UTC RFC 3339 timestamp with fixed millisecond precision, so string order is time order.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
