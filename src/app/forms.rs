use crate::domain::{Client, ClientId, ReservationId, Room, RoomId};
use crate::utils::error::Result;
use crate::utils::validation::{parse_number, require_non_zero, require_text};
use rust_decimal::Decimal;

// Every field is parsed before anything is checked or submitted, so a bad
// form never reaches the manager half-done.

#[derive(Debug, Clone, Default)]
pub struct ClientForm {
    pub id: String,
    pub name: String,
    pub national_id: String,
    pub age: String,
}

impl ClientForm {
    pub fn into_client(self) -> Result<Client> {
        let id: u32 = parse_number("client id", &self.id)?;
        let age: u32 = parse_number("age", &self.age)?;

        let id = require_non_zero("client id", id)?;
        let name = require_text("name", &self.name)?;
        let national_id = require_text("national id", &self.national_id)?;
        let age = require_non_zero("age", age)?;

        Ok(Client::new(id, name, national_id, age))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoomForm {
    pub id: String,
    pub name: String,
    pub price: String,
}

impl RoomForm {
    pub fn into_room(self) -> Result<Room> {
        let id: u32 = parse_number("room id", &self.id)?;
        let price: Decimal = parse_number("price", &self.price)?;

        let id = require_non_zero("room id", id)?;
        let name = require_text("room name", &self.name)?;
        let price = require_non_zero("price", price)?;

        Ok(Room::new(id, name, price))
    }
}

pub fn parse_client_id(raw: &str) -> Result<ClientId> {
    parse_number::<u32>("client id", raw).map(ClientId)
}

pub fn parse_room_id(raw: &str) -> Result<RoomId> {
    parse_number::<u32>("room id", raw).map(RoomId)
}

pub fn parse_reservation_id(raw: &str) -> Result<ReservationId> {
    parse_number::<u32>("reservation id", raw).map(ReservationId)
}
