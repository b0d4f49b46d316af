use mongodb::{bson::doc, Client, Collection, Database};
use tracing::{debug, info};

use super::config::DatabaseConfig;
use super::error::DatabaseError;

enum ConnectionState {
    Disconnected,
    Connected { client: Client, database: Database },
}

/// Owns the MongoDB client for the `portfolio` database.
///
/// Construction performs no I/O. The client only exists between a successful
/// [`connect`](Self::connect) and the next [`disconnect`](Self::disconnect).
pub struct DatabaseHandle {
    connection_url: String,
    database_name: String,
    state: ConnectionState,
}

impl DatabaseHandle {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            connection_url: config.url.clone(),
            database_name: config.name().to_string(),
            state: ConnectionState::Disconnected,
        }
    }

    /// Build a handle whose URL comes from `MONGODB_URL`. No I/O.
    pub fn from_env() -> Self {
        Self::new(&DatabaseConfig::from_env())
    }

    /// Open a client and bind the database. A client left over from a previous
    /// call is shut down before it is replaced.
    pub async fn connect(&mut self) -> Result<(), DatabaseError> {
        debug!(database = %self.database_name, "Opening MongoDB client");

        let client = Client::with_uri_str(&self.connection_url).await?;
        let database = client.database(&self.database_name);

        let previous = std::mem::replace(
            &mut self.state,
            ConnectionState::Connected { client, database },
        );
        if let ConnectionState::Connected { client, .. } = previous {
            debug!("Shutting down previous MongoDB client");
            client.shutdown().await;
        }

        info!(database = %self.database_name, "Connected to MongoDB");
        Ok(())
    }

    /// Close the client if there is one. Never fails.
    pub async fn disconnect(&mut self) {
        if let ConnectionState::Connected { client, .. } =
            std::mem::replace(&mut self.state, ConnectionState::Disconnected)
        {
            client.shutdown().await;
            info!("Disconnected from MongoDB");
        }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Result<Collection<T>, DatabaseError> {
        match &self.state {
            ConnectionState::Connected { database, .. } => Ok(database.collection(name)),
            ConnectionState::Disconnected => Err(DatabaseError::NotConnected),
        }
    }

    /// Clone of the bound database, for callers that must not hold the handle
    /// across driver I/O.
    pub fn database(&self) -> Result<Database, DatabaseError> {
        match &self.state {
            ConnectionState::Connected { database, .. } => Ok(database.clone()),
            ConnectionState::Disconnected => Err(DatabaseError::NotConnected),
        }
    }

    /// Round-trip a `ping` command to the server.
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        ping_database(&self.database()?).await
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, ConnectionState::Connected { .. })
    }

    pub fn connection_url(&self) -> &str {
        &self.connection_url
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

pub async fn ping_database(database: &Database) -> Result<(), DatabaseError> {
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(DatabaseError::Ping)?;

    Ok(())
}
