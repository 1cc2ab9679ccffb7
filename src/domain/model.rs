use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

macro_rules! id_type {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(ClientId);
id_type!(RoomId);
id_type!(ReservationId);

/// Registry-assigned handle for one room entry. Unlike [`RoomId`] it is
/// never shared, so it tells apart rooms registered under the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) struct RoomKey(pub(crate) u64);

/// A guest record. Never edited after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    /// CPF or any other national identity document number.
    pub national_id: String,
    pub age: u32,
}

impl Client {
    pub fn new(id: u32, name: impl Into<String>, national_id: impl Into<String>, age: u32) -> Self {
        Self {
            id: ClientId(id),
            name: name.into(),
            national_id: national_id.into(),
            age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub price: Decimal,
    available: bool,
    #[serde(skip)]
    key: RoomKey,
}

impl Room {
    /// Rooms start out available.
    pub fn new(id: u32, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: RoomId(id),
            name: name.into(),
            price,
            available: true,
            key: RoomKey::default(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn key(&self) -> RoomKey {
        self.key
    }

    // Set once, when the registry accepts the room.
    pub(crate) fn set_key(&mut self, key: RoomKey) {
        self.key = key;
    }

    // Only the reservation lifecycle flips this.
    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Active,
    Closed,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Active => write!(f, "Active"),
            ReservationStatus::Closed => write!(f, "Closed"),
        }
    }
}

/// A stay. Client and room names are copied in at booking time, so the
/// record keeps describing the same guest and room after either is
/// removed or its id is registered again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    id: ReservationId,
    check_in: NaiveDate,
    room_id: RoomId,
    #[serde(skip)]
    room_key: RoomKey,
    room_name: String,
    client_id: ClientId,
    client_name: String,
    status: ReservationStatus,
    check_out: Option<NaiveDateTime>,
}

impl Reservation {
    pub(crate) fn open(id: ReservationId, check_in: NaiveDate, room: &Room, client: &Client) -> Self {
        Self {
            id,
            check_in,
            room_id: room.id,
            room_key: room.key(),
            room_name: room.name.clone(),
            client_id: client.id,
            client_name: client.name.clone(),
            status: ReservationStatus::Active,
            check_out: None,
        }
    }

    /// Active -> Closed. There is no way back.
    pub(crate) fn close(&mut self, at: NaiveDateTime) {
        self.status = ReservationStatus::Closed;
        self.check_out = Some(at);
    }

    /// Assigned by the manager, never reused.
    pub fn id(&self) -> ReservationId {
        self.id
    }

    /// Day the reservation was made.
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub(crate) fn room_key(&self) -> RoomKey {
        self.room_key
    }

    /// Name of the room as it was when the reservation was made.
    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Name of the guest as it was when the reservation was made.
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    /// `None` while the reservation is active.
    pub fn check_out(&self) -> Option<NaiveDateTime> {
        self.check_out
    }

    /// True until the reservation is ended.
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// `YYYY-MM-DD`
    pub fn check_in_display(&self) -> String {
        self.check_in.format(DATE_FORMAT).to_string()
    }

    /// `YYYY-MM-DD HH:MM:SS`, or `None` while the reservation is active.
    pub fn check_out_display(&self) -> Option<String> {
        self.check_out
            .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
    }
}
