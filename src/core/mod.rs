pub mod manager;
pub mod report;

pub use manager::{RegistryPolicy, ReservationManager};
pub use report::{ReportFormat, ReservationReport};
