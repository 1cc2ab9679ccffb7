// Domain layer: entities and ports. No dependencies on config, console or files.

pub mod model;
pub mod ports;

pub use model::{Client, ClientId, Reservation, ReservationId, ReservationStatus, Room, RoomId};
pub use ports::{Clock, FixedClock, SystemClock};
