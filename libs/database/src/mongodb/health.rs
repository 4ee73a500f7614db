use mongodb::{Client, bson::doc};

use crate::common::{DatabaseError, DatabaseResult};

/// `{ ping: 1 }` against `admin`; needs no privileges on user databases.
pub(crate) async fn ping(client: &Client) -> Result<(), mongodb::error::Error> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}

/// Readiness probe: one round trip to the server.
///
/// Fails after the client's server selection timeout when no server answers.
///
/// ```ignore
/// check_health(&client).await.map_err(|e| e.to_string())?;
/// ```
pub async fn check_health(client: &Client) -> DatabaseResult<()> {
    let started = std::time::Instant::now();
    let result = ping(client).await;
    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        ok = result.is_ok(),
        "MongoDB ping"
    );

    result.map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
