use sqlx::SqlitePool;

/// Executes entity query messages against the connection pool.
///
/// Every [`kanau::processor::Processor`] impl in `entities` hangs off this
/// type, so the pool is the single shared mutable resource.
pub struct DatabaseProcessor {
    pub pool: SqlitePool,
}
