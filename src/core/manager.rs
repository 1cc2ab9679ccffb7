use crate::domain::model::RoomKey;
use crate::domain::{Client, ClientId, Clock, Reservation, ReservationId, Room, RoomId};
use crate::utils::error::{HotelError, Result};

/// How strictly the registry treats caller-assigned ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryPolicy {
    /// When false, duplicate room/client ids are accepted and every
    /// lookup resolves to the first match.
    pub enforce_unique_ids: bool,
}

impl Default for RegistryPolicy {
    fn default() -> Self {
        Self {
            enforce_unique_ids: true,
        }
    }
}

/// In-memory registry of rooms, clients and reservations.
///
/// A room is unavailable exactly while an active reservation points at it.
/// Only [`make_reservation`](Self::make_reservation) and
/// [`end_reservation`](Self::end_reservation) change availability.
pub struct ReservationManager<C: Clock> {
    rooms: Vec<Room>,
    clients: Vec<Client>,
    reservations: Vec<Reservation>,
    next_reservation_id: u32,
    next_room_key: u64,
    policy: RegistryPolicy,
    clock: C,
}

impl<C: Clock> ReservationManager<C> {
    /// Empty registry that rejects duplicate ids.
    pub fn new(clock: C) -> Self {
        Self::with_policy(clock, RegistryPolicy::default())
    }

    /// Empty registry with an explicit id policy.
    pub fn with_policy(clock: C, policy: RegistryPolicy) -> Self {
        Self {
            rooms: Vec::new(),
            clients: Vec::new(),
            reservations: Vec::new(),
            next_reservation_id: 1,
            next_room_key: 1,
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> RegistryPolicy {
        self.policy
    }

    /// The clock that stamps check-in and check-out.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Rooms free to book, in insertion order.
    pub fn available_rooms(&self) -> Vec<&Room> {
        self.rooms.iter().filter(|r| r.is_available()).collect()
    }

    /// Rooms held by an active reservation, in insertion order.
    pub fn reserved_rooms(&self) -> Vec<&Room> {
        self.rooms.iter().filter(|r| !r.is_available()).collect()
    }

    /// Every registered room.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Every registered client.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Every reservation ever made, active or closed.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// First room registered under `id`.
    pub fn find_room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// First client registered under `id`.
    pub fn find_client(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Reservation with this id, active or closed.
    pub fn find_reservation(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id() == id)
    }

    /// The active reservation holding a room with this id, if any.
    pub fn active_reservation_for_room(&self, id: RoomId) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.is_active() && r.room_id() == id)
    }

    /// Registers an available room.
    pub fn add_room(&mut self, mut room: Room) -> Result<()> {
        if self.policy.enforce_unique_ids && self.find_room(room.id).is_some() {
            tracing::warn!("Rejected room {}: id already registered", room.id);
            return Err(HotelError::DuplicateRoom(room.id));
        }
        room.set_key(RoomKey(self.next_room_key));
        self.next_room_key += 1;
        tracing::info!("Added room {} ({}, price {})", room.id, room.name, room.price);
        self.rooms.push(room);
        Ok(())
    }

    /// Removes every room with this id. Unknown ids are a no-op.
    pub fn remove_room(&mut self, id: RoomId) -> Result<()> {
        if self.active_reservation_for_room(id).is_some() {
            tracing::warn!("Refused to remove room {}: active reservation", id);
            return Err(HotelError::RoomOccupied(id));
        }
        let before = self.rooms.len();
        self.rooms.retain(|r| r.id != id);
        tracing::info!("Removed {} room(s) with id {}", before - self.rooms.len(), id);
        Ok(())
    }

    /// Registers a client.
    pub fn add_client(&mut self, client: Client) -> Result<()> {
        if self.policy.enforce_unique_ids && self.find_client(client.id).is_some() {
            tracing::warn!("Rejected client {}: id already registered", client.id);
            return Err(HotelError::DuplicateClient(client.id));
        }
        tracing::info!("Added client {} ({})", client.id, client.name);
        self.clients.push(client);
        Ok(())
    }

    /// Removes every client with this id. Unknown ids are a no-op.
    pub fn remove_client(&mut self, id: ClientId) -> Result<()> {
        if self
            .reservations
            .iter()
            .any(|r| r.is_active() && r.client_id() == id)
        {
            tracing::warn!("Refused to remove client {}: active reservation", id);
            return Err(HotelError::ClientHasActiveReservation(id));
        }
        let before = self.clients.len();
        self.clients.retain(|c| c.id != id);
        tracing::info!(
            "Removed {} client(s) with id {}",
            before - self.clients.len(),
            id
        );
        Ok(())
    }

    /// Books `room_id` for `client_id`, checking in today.
    ///
    /// A room that exists but is taken is reported the same way as an
    /// unknown room. Nothing changes on error.
    pub fn make_reservation(
        &mut self,
        client_id: ClientId,
        room_id: RoomId,
    ) -> Result<&Reservation> {
        let client = self.find_client(client_id).ok_or_else(|| {
            tracing::warn!("Reservation refused: unknown client {}", client_id);
            HotelError::ClientNotFound(client_id)
        })?;
        let room_index = self
            .rooms
            .iter()
            .position(|r| r.id == room_id && r.is_available())
            .ok_or_else(|| {
                tracing::warn!("Reservation refused: room {} missing or taken", room_id);
                HotelError::RoomUnavailable(room_id)
            })?;

        let id = ReservationId(self.next_reservation_id);
        let reservation =
            Reservation::open(id, self.clock.today(), &self.rooms[room_index], client);
        self.next_reservation_id += 1;
        self.rooms[room_index].set_available(false);

        tracing::info!(
            "Reservation {} opened: client {} in room {} from {}",
            id,
            client_id,
            room_id,
            reservation.check_in_display()
        );
        self.reservations.push(reservation);
        Ok(&self.reservations[self.reservations.len() - 1])
    }

    /// Closes the active reservation with this id and frees the exact room
    /// it holds, even when other rooms share that room's id.
    pub fn end_reservation(&mut self, id: ReservationId) -> Result<&Reservation> {
        let index = self
            .reservations
            .iter()
            .position(|r| r.id() == id && r.is_active())
            .ok_or_else(|| {
                tracing::warn!("No active reservation {} to end", id);
                HotelError::ReservationNotActive(id)
            })?;

        let now = self.clock.now();
        let reservation = &mut self.reservations[index];
        reservation.close(now);
        let room_id = reservation.room_id();
        let room_key = reservation.room_key();

        match self.rooms.iter_mut().find(|r| r.key() == room_key) {
            Some(room) => room.set_available(true),
            None => tracing::warn!(
                "Reservation {} closed but room {} is no longer registered",
                id,
                room_id
            ),
        }

        let reservation = &self.reservations[index];
        tracing::info!(
            "Reservation {} closed at {}",
            id,
            reservation.check_out_display().unwrap_or_default()
        );
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FixedClock, ReservationStatus};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
        )
    }

    fn hotel() -> ReservationManager<FixedClock> {
        let mut manager = ReservationManager::new(clock());
        manager.add_room(Room::new(1, "Suite", dec!(200.0))).unwrap();
        manager.add_room(Room::new(2, "Single", dec!(90))).unwrap();
        manager.add_client(Client::new(1, "Ana", "111", 30)).unwrap();
        manager
    }

    #[test]
    fn test_reservation_ids_keep_counting() {
        let mut manager = hotel();
        let first = manager.make_reservation(ClientId(1), RoomId(1)).unwrap().id();
        manager.end_reservation(first).unwrap();
        let second = manager.make_reservation(ClientId(1), RoomId(1)).unwrap().id();
        let third = manager.make_reservation(ClientId(1), RoomId(2)).unwrap().id();
        assert_eq!(
            (first, second, third),
            (ReservationId(1), ReservationId(2), ReservationId(3))
        );
    }

    #[test]
    fn test_unknown_client_leaves_room_available() {
        let mut manager = hotel();
        let err = manager.make_reservation(ClientId(9), RoomId(1)).unwrap_err();
        assert!(matches!(err, HotelError::ClientNotFound(ClientId(9))));
        assert!(manager.find_room(RoomId(1)).unwrap().is_available());
        assert!(manager.reservations().is_empty());
    }

    #[test]
    fn test_unknown_room_is_reported_as_unavailable() {
        let mut manager = hotel();
        let err = manager.make_reservation(ClientId(1), RoomId(77)).unwrap_err();
        assert!(matches!(err, HotelError::RoomUnavailable(RoomId(77))));
    }

    #[test]
    fn test_check_out_uses_clock() {
        let mut manager = hotel();
        let id = manager.make_reservation(ClientId(1), RoomId(1)).unwrap().id();
        manager.clock().advance(chrono::Duration::days(2));
        let closed = manager.end_reservation(id).unwrap();
        assert_eq!(closed.status(), ReservationStatus::Closed);
        assert_eq!(closed.check_in_display(), "2024-05-01");
        assert_eq!(
            closed.check_out_display().as_deref(),
            Some("2024-05-03 14:00:00")
        );
    }

    #[test]
    fn test_duplicate_ids_rejected_by_default() {
        let mut manager = hotel();
        assert!(matches!(
            manager.add_room(Room::new(1, "Other", dec!(10))),
            Err(HotelError::DuplicateRoom(RoomId(1)))
        ));
        assert!(matches!(
            manager.add_client(Client::new(1, "Bia", "222", 22)),
            Err(HotelError::DuplicateClient(ClientId(1)))
        ));
        assert_eq!(manager.rooms().len(), 2);
        assert_eq!(manager.clients().len(), 1);
    }

    #[test]
    fn test_permissive_policy_keeps_duplicates_first_match_wins() {
        let mut manager = ReservationManager::with_policy(
            clock(),
            RegistryPolicy {
                enforce_unique_ids: false,
            },
        );
        assert!(!manager.policy().enforce_unique_ids);
        manager.add_room(Room::new(5, "Old", dec!(50))).unwrap();
        manager.add_room(Room::new(5, "New", dec!(60))).unwrap();
        manager.add_client(Client::new(1, "Ana", "111", 30)).unwrap();
        manager.add_client(Client::new(1, "Ana Two", "112", 31)).unwrap();

        assert_eq!(manager.find_room(RoomId(5)).unwrap().name, "Old");
        assert_eq!(manager.find_client(ClientId(1)).unwrap().name, "Ana");

        manager.make_reservation(ClientId(1), RoomId(5)).unwrap();
        manager.make_reservation(ClientId(1), RoomId(5)).unwrap();
        assert!(manager.available_rooms().is_empty());
        assert!(manager.make_reservation(ClientId(1), RoomId(5)).is_err());

        manager.end_reservation(ReservationId(1)).unwrap();
        manager.end_reservation(ReservationId(2)).unwrap();
        manager.remove_room(RoomId(5)).unwrap();
        manager.remove_client(ClientId(1)).unwrap();
        assert!(manager.rooms().is_empty());
        assert!(manager.clients().is_empty());
    }

    #[test]
    fn test_ending_frees_the_room_actually_held_when_ids_repeat() {
        let mut manager = ReservationManager::with_policy(
            clock(),
            RegistryPolicy {
                enforce_unique_ids: false,
            },
        );
        manager.add_room(Room::new(5, "Old", dec!(50))).unwrap();
        manager.add_room(Room::new(5, "New", dec!(60))).unwrap();
        manager.add_client(Client::new(1, "Ana", "111", 30)).unwrap();

        manager.make_reservation(ClientId(1), RoomId(5)).unwrap();
        let second = manager.make_reservation(ClientId(1), RoomId(5)).unwrap();
        assert_eq!(second.room_name(), "New");

        manager.end_reservation(ReservationId(2)).unwrap();
        let available: Vec<&str> = manager
            .available_rooms()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(available, vec!["New"]);
        let reserved: Vec<&str> = manager
            .reserved_rooms()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(reserved, vec!["Old"]);

        for room in manager.rooms() {
            let held = manager
                .reservations()
                .iter()
                .any(|r| r.is_active() && r.room_key() == room.key());
            assert_eq!(room.is_available(), !held, "room {} out of sync", room.name);
        }
    }

    #[test]
    fn test_reused_ids_do_not_rewrite_past_reservations() {
        let mut manager = hotel();
        manager.make_reservation(ClientId(1), RoomId(1)).unwrap();
        manager.end_reservation(ReservationId(1)).unwrap();

        manager.remove_client(ClientId(1)).unwrap();
        manager.remove_room(RoomId(1)).unwrap();
        manager.add_client(Client::new(1, "Bia", "333", 25)).unwrap();
        manager.add_room(Room::new(1, "Attic", dec!(40))).unwrap();

        let past = manager.find_reservation(ReservationId(1)).unwrap();
        assert_eq!(past.client_name(), "Ana");
        assert_eq!(past.room_name(), "Suite");

        // the new room 1 is a different entry and is bookable
        manager.make_reservation(ClientId(1), RoomId(1)).unwrap();
        assert_eq!(manager.reservations()[1].room_name(), "Attic");
        assert_eq!(manager.reservations()[1].client_name(), "Bia");
    }

    #[test]
    fn test_cannot_remove_booked_room_or_client() {
        let mut manager = hotel();
        manager.make_reservation(ClientId(1), RoomId(1)).unwrap();

        assert!(matches!(
            manager.remove_room(RoomId(1)),
            Err(HotelError::RoomOccupied(RoomId(1)))
        ));
        assert!(matches!(
            manager.remove_client(ClientId(1)),
            Err(HotelError::ClientHasActiveReservation(ClientId(1)))
        ));

        manager.end_reservation(ReservationId(1)).unwrap();
        manager.remove_room(RoomId(1)).unwrap();
        manager.remove_client(ClientId(1)).unwrap();
        // closed reservations outlive the records they point at
        assert_eq!(manager.reservations().len(), 1);
    }
}
