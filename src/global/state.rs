use std::sync::Arc;

use tokio::sync::RwLock;

use crate::global::database::DatabaseHandle;

/// The database handle as shared between `main` and the API handlers.
/// Lifecycle calls take the write lock, lookups and pings the read lock.
pub type SharedDatabase = Arc<RwLock<DatabaseHandle>>;

pub fn share(db: DatabaseHandle) -> SharedDatabase {
    Arc::new(RwLock::new(db))
}
