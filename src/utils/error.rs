use crate::domain::model::{ClientId, ReservationId, RoomId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("Client {0} not found")]
    ClientNotFound(ClientId),

    #[error("Room {0} does not exist or is not available")]
    RoomUnavailable(RoomId),

    #[error("No active reservation with id {0}")]
    ReservationNotActive(ReservationId),

    #[error("A room with id {0} is already registered")]
    DuplicateRoom(RoomId),

    #[error("A client with id {0} is already registered")]
    DuplicateClient(ClientId),

    #[error("Room {0} is held by an active reservation")]
    RoomOccupied(RoomId),

    #[error("Client {0} holds an active reservation")]
    ClientHasActiveReservation(ClientId),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A business rule refused the operation; state is unchanged.
    Domain,
    /// User input could not be coerced or was incomplete.
    Input,
    Configuration,
    System,
}

impl HotelError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HotelError::ClientNotFound(_)
            | HotelError::RoomUnavailable(_)
            | HotelError::ReservationNotActive(_)
            | HotelError::DuplicateRoom(_)
            | HotelError::DuplicateClient(_)
            | HotelError::RoomOccupied(_)
            | HotelError::ClientHasActiveReservation(_) => ErrorCategory::Domain,
            HotelError::InvalidInput { .. } | HotelError::MissingField { .. } => {
                ErrorCategory::Input
            }
            HotelError::ConfigError { .. } | HotelError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            HotelError::IoError(_)
            | HotelError::CsvError(_)
            | HotelError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// Message shown to the person at the front desk.
    pub fn user_friendly_message(&self) -> String {
        match self {
            HotelError::ClientNotFound(_) => "Invalid client id.".to_string(),
            HotelError::RoomUnavailable(_) => "Invalid or unavailable room id.".to_string(),
            HotelError::ReservationNotActive(_) => {
                "Could not end the reservation. Invalid id or reservation already closed."
                    .to_string()
            }
            HotelError::DuplicateRoom(id) => format!("Room id {} is already in use.", id),
            HotelError::DuplicateClient(id) => format!("Client id {} is already in use.", id),
            HotelError::RoomOccupied(id) => format!(
                "Room {} has an active reservation. End it before removing the room.",
                id
            ),
            HotelError::ClientHasActiveReservation(id) => format!(
                "Client {} has an active reservation. End it before removing the client.",
                id
            ),
            HotelError::InvalidInput { field, value, .. } => {
                format!("Invalid input for {}: '{}'.", field, value)
            }
            HotelError::MissingField { .. } => "All fields are required.".to_string(),
            HotelError::ConfigError { message } => format!("Configuration problem: {}", message),
            HotelError::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration problem in {}: {}", field, reason)
            }
            HotelError::IoError(e) => format!("File operation failed: {}", e),
            HotelError::CsvError(e) => format!("Could not write CSV: {}", e),
            HotelError::SerializationError(e) => format!("Could not write JSON: {}", e),
        }
    }

    pub fn invalid_input(field: &str, value: &str, reason: impl Into<String>) -> Self {
        HotelError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HotelError>;
