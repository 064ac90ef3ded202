pub mod database;
pub mod metrics;

pub use database::EmployeeDb;
pub use self::metrics::{get_metrics, init_metrics, record_operation};
