/// Storage adapters for the catalog
pub mod infrastructure;
/// Repository ports consumed by the catalog service
pub mod ports;
/// PostgreSQL pool handle
pub mod postgres;
pub mod timeout;

pub use postgres::{PoolSettings, PoolStats, PostgresDatabase};
