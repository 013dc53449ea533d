use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::identity::models::IdentityId;
use crate::room::errors::RoomError;
use crate::room::errors::RoomIdError;

/// Lowest accepted monthly price, in VND.
pub const MIN_PRICE_PER_MONTH: i64 = 100_000;

/// Room listing entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub title: String,
    pub description: String,
    pub room_type: RoomType,
    pub status: RoomStatus,
    /// Floor area in square metres.
    pub area: f64,
    pub price_per_month: i64,
    pub deposit: i64,
    pub max_occupants: i32,
    pub floor: i32,
    pub owner_id: IdentityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Build a new listing owned by `owner_id`.
    ///
    /// # Errors
    /// * `Invalid` - A field is empty or out of range
    pub fn create(listing: NewRoom, owner_id: IdentityId) -> Result<Self, RoomError> {
        let now = Utc::now();
        let room = Self {
            id: RoomId::new(),
            title: listing.title.trim().to_string(),
            description: listing.description.trim().to_string(),
            room_type: listing.room_type,
            status: listing.status.unwrap_or(RoomStatus::Available),
            area: listing.area,
            price_per_month: listing.price_per_month,
            deposit: listing.deposit,
            max_occupants: listing.max_occupants,
            floor: listing.floor,
            owner_id,
            created_at: now,
            updated_at: now,
        };
        room.validate()?;
        Ok(room)
    }

    /// Apply a partial update, returning the updated listing.
    ///
    /// # Errors
    /// * `Invalid` - The result would violate a listing invariant
    pub fn apply(&self, update: RoomUpdate) -> Result<Self, RoomError> {
        let mut room = self.clone();

        if let Some(title) = update.title {
            room.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            room.description = description.trim().to_string();
        }
        if let Some(room_type) = update.room_type {
            room.room_type = room_type;
        }
        if let Some(status) = update.status {
            room.status = status;
        }
        if let Some(area) = update.area {
            room.area = area;
        }
        if let Some(price) = update.price_per_month {
            room.price_per_month = price;
        }
        if let Some(deposit) = update.deposit {
            room.deposit = deposit;
        }
        if let Some(max_occupants) = update.max_occupants {
            room.max_occupants = max_occupants;
        }
        if let Some(floor) = update.floor {
            room.floor = floor;
        }

        room.validate()?;
        room.updated_at = Utc::now();
        Ok(room)
    }

    fn validate(&self) -> Result<(), RoomError> {
        let invalid = |message: &str| Err(RoomError::Invalid(message.to_string()));

        if self.title.is_empty() {
            return invalid("Title is required");
        }
        if self.description.is_empty() {
            return invalid("Description is required");
        }
        if !(1.0..=500.0).contains(&self.area) {
            return invalid("Area must be between 1 and 500 m²");
        }
        if self.price_per_month < MIN_PRICE_PER_MONTH {
            return invalid("Price per month must be at least 100,000 VND");
        }
        if self.deposit < 0 {
            return invalid("Deposit must be positive");
        }
        if !(1..=10).contains(&self.max_occupants) {
            return invalid("Max occupants must be between 1 and 10");
        }
        if !(0..=50).contains(&self.floor) {
            return invalid("Floor must be between 0 and 50");
        }
        Ok(())
    }

    pub fn is_owned_by(&self, id: &IdentityId) -> bool {
        self.owner_id == *id
    }
}

/// Room unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(pub Uuid);

impl RoomId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, RoomIdError> {
        Uuid::parse_str(s)
            .map(RoomId)
            .map_err(|e| RoomIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Shared,
    Studio,
    Apartment,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Shared => "shared",
            RoomType::Studio => "studio",
            RoomType::Apartment => "apartment",
        }
    }
}

impl FromStr for RoomType {
    type Err = RoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(RoomType::Single),
            "double" => Ok(RoomType::Double),
            "shared" => Ok(RoomType::Shared),
            "studio" => Ok(RoomType::Studio),
            "apartment" => Ok(RoomType::Apartment),
            other => Err(RoomError::Invalid(format!("Invalid room type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
    Reserved,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Maintenance => "maintenance",
            RoomStatus::Reserved => "reserved",
        }
    }
}

impl FromStr for RoomStatus {
    type Err = RoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(RoomStatus::Available),
            "occupied" => Ok(RoomStatus::Occupied),
            "maintenance" => Ok(RoomStatus::Maintenance),
            "reserved" => Ok(RoomStatus::Reserved),
            other => Err(RoomError::Invalid(format!("Invalid room status: {}", other))),
        }
    }
}

/// Listing fields supplied on creation.
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub title: String,
    pub description: String,
    pub room_type: RoomType,
    pub status: Option<RoomStatus>,
    pub area: f64,
    pub price_per_month: i64,
    pub deposit: i64,
    pub max_occupants: i32,
    pub floor: i32,
}

/// Partial listing update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct RoomUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub room_type: Option<RoomType>,
    pub status: Option<RoomStatus>,
    pub area: Option<f64>,
    pub price_per_month: Option<i64>,
    pub deposit: Option<i64>,
    pub max_occupants: Option<i32>,
    pub floor: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> NewRoom {
        NewRoom {
            title: " Sunny studio ".to_string(),
            description: "Near the river".to_string(),
            room_type: RoomType::Studio,
            status: None,
            area: 25.0,
            price_per_month: 3_500_000,
            deposit: 3_500_000,
            max_occupants: 2,
            floor: 3,
        }
    }

    #[test]
    fn test_create_defaults_to_available() {
        let owner = IdentityId::new();
        let room = Room::create(listing(), owner).unwrap();

        assert_eq!(room.title, "Sunny studio");
        assert_eq!(room.status, RoomStatus::Available);
        assert!(room.is_owned_by(&owner));
        assert!(!room.is_owned_by(&IdentityId::new()));
    }

    #[test]
    fn test_create_rejects_out_of_range_fields() {
        let cases: [fn(&mut NewRoom); 8] = [
            |l| l.title = "   ".to_string(),
            |l| l.description = String::new(),
            |l| l.area = 0.5,
            |l| l.price_per_month = 99_999,
            |l| l.deposit = -1,
            |l| l.max_occupants = 0,
            |l| l.max_occupants = 11,
            |l| l.floor = 51,
        ];

        for mutate in cases {
            let mut l = listing();
            mutate(&mut l);
            assert!(matches!(
                Room::create(l, IdentityId::new()),
                Err(RoomError::Invalid(_))
            ));
        }
    }

    #[test]
    fn test_apply_keeps_unset_fields() {
        let room = Room::create(listing(), IdentityId::new()).unwrap();

        let updated = room
            .apply(RoomUpdate {
                status: Some(RoomStatus::Reserved),
                price_per_month: Some(4_000_000),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.id, room.id);
        assert_eq!(updated.title, room.title);
        assert_eq!(updated.status, RoomStatus::Reserved);
        assert_eq!(updated.price_per_month, 4_000_000);
        assert!(updated.updated_at >= room.updated_at);
    }

    #[test]
    fn test_apply_validates_result() {
        let room = Room::create(listing(), IdentityId::new()).unwrap();

        let result = room.apply(RoomUpdate {
            price_per_month: Some(10),
            ..Default::default()
        });

        assert!(matches!(result, Err(RoomError::Invalid(_))));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("shared".parse::<RoomType>().unwrap(), RoomType::Shared);
        assert_eq!(
            "maintenance".parse::<RoomStatus>().unwrap(),
            RoomStatus::Maintenance
        );
        assert!("castle".parse::<RoomType>().is_err());
    }
}
