use crate::core::{RegistryPolicy, ReservationManager};
use crate::domain::{Client, Clock, Room};
use crate::utils::error::{HotelError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive, Validate};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_HOTEL_NAME: &str = "Hotel Reservation Manager";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotelConfig {
    pub hotel: Option<HotelSection>,
    pub registry: Option<RegistrySection>,
    #[serde(default)]
    pub rooms: Vec<RoomSeed>,
    #[serde(default)]
    pub clients: Vec<ClientSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSection {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySection {
    pub enforce_unique_ids: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSeed {
    pub id: u32,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSeed {
    pub id: u32,
    pub name: String,
    #[serde(alias = "cpf")]
    pub national_id: String,
    pub age: u32,
}

impl HotelConfig {
    /// Loads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HotelError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HotelError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HotelError::ConfigError {
            message: format!("placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(hotel) = &self.hotel {
            validate_non_empty_string("hotel.name", &hotel.name)?;
        }

        for room in &self.rooms {
            validate_positive("rooms.id", room.id)?;
            validate_non_empty_string("rooms.name", &room.name)?;
            validate_positive("rooms.price", room.price)?;
        }

        for client in &self.clients {
            validate_positive("clients.id", client.id)?;
            validate_non_empty_string("clients.name", &client.name)?;
            validate_non_empty_string("clients.national_id", &client.national_id)?;
            validate_positive("clients.age", client.age)?;
        }

        Ok(())
    }

    pub fn hotel_name(&self) -> &str {
        self.hotel
            .as_ref()
            .map(|h| h.name.as_str())
            .unwrap_or(DEFAULT_HOTEL_NAME)
    }

    pub fn policy(&self) -> RegistryPolicy {
        let defaults = RegistryPolicy::default();
        RegistryPolicy {
            enforce_unique_ids: self
                .registry
                .as_ref()
                .and_then(|r| r.enforce_unique_ids)
                .unwrap_or(defaults.enforce_unique_ids),
        }
    }

    /// Registers the configured rooms and clients, in file order.
    pub fn seed<C: Clock>(&self, manager: &mut ReservationManager<C>) -> Result<usize> {
        for room in &self.rooms {
            manager.add_room(Room::new(room.id, room.name.clone(), room.price))?;
        }
        for client in &self.clients {
            manager.add_client(Client::new(
                client.id,
                client.name.clone(),
                client.national_id.clone(),
                client.age,
            ))?;
        }
        let seeded = self.rooms.len() + self.clients.len();
        tracing::info!(
            "Seeded {} room(s) and {} client(s)",
            self.rooms.len(),
            self.clients.len()
        );
        Ok(seeded)
    }

    /// Builds a manager with the configured policy and seed data.
    pub fn build_manager<C: Clock>(&self, clock: C) -> Result<ReservationManager<C>> {
        let mut manager = ReservationManager::with_policy(clock, self.policy());
        self.seed(&mut manager)?;
        Ok(manager)
    }
}

impl Validate for HotelConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
