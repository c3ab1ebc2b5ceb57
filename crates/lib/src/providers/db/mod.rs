pub mod mysql;
pub mod storage;

pub use mysql::MySqlSession;
pub use storage::{QueryOutcome, SqlBackend, QUERY_ERROR_PREFIX};
