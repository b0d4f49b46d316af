use std::time::Duration;

use crate::global::state::SharedDatabase;

const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Application state shared across API handlers
#[derive(Clone)]
pub struct ApiState {
    pub db: SharedDatabase,
    pub ping_timeout: Duration,
}

impl ApiState {
    pub fn new(db: SharedDatabase) -> Self {
        Self {
            db,
            ping_timeout: DEFAULT_PING_TIMEOUT,
        }
    }

    pub fn with_ping_timeout(mut self, timeout: Duration) -> Self {
        self.ping_timeout = timeout;
        self
    }
}
