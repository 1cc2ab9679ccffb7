pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::Console;
pub use config::HotelConfig;
pub use crate::core::{RegistryPolicy, ReportFormat, ReservationManager, ReservationReport};
pub use domain::{Client, ClientId, Reservation, ReservationId, ReservationStatus, Room, RoomId};
pub use utils::error::{HotelError, Result};
