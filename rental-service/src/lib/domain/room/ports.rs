use async_trait::async_trait;

use crate::access::models::Principal;
use crate::domain::page::Page;
use crate::domain::page::PageRequest;
use crate::room::errors::RoomError;
use crate::room::models::NewRoom;
use crate::room::models::Room;
use crate::room::models::RoomId;
use crate::room::models::RoomUpdate;

/// Port for room listing operations.
///
/// Role gating happens in the access guard before these are called; the
/// service only enforces ownership.
#[async_trait]
pub trait RoomServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `Invalid` - A listing field is out of range
    async fn create_room(&self, listing: NewRoom, owner: &Principal) -> Result<Room, RoomError>;

    /// Newest listings first.
    async fn list_rooms(&self, page: PageRequest) -> Result<Page<Room>, RoomError>;

    /// # Errors
    /// * `NotFound` - Room does not exist
    async fn get_room(&self, id: &RoomId) -> Result<Room, RoomError>;

    /// Update a listing. Non-admin callers may only update their own rooms.
    ///
    /// # Errors
    /// * `NotFound` - Room does not exist
    /// * `NotOwner` - Caller is neither ADMIN nor the owner
    /// * `Invalid` - The update would violate a listing invariant
    async fn update_room(
        &self,
        id: &RoomId,
        update: RoomUpdate,
        caller: &Principal,
    ) -> Result<Room, RoomError>;

    /// # Errors
    /// * `NotFound` - Room does not exist
    /// * `NotOwner` - Caller is neither ADMIN nor the owner
    async fn delete_room(&self, id: &RoomId, caller: &Principal) -> Result<(), RoomError>;
}

/// Persistence operations for room listings.
#[async_trait]
pub trait RoomRepository: Send + Sync + 'static {
    async fn insert(&self, room: Room) -> Result<Room, RoomError>;

    /// # Returns
    /// Optional room (None if not found)
    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, RoomError>;

    /// # Returns
    /// The page's rooms, newest first, and the total count
    async fn list(&self, page: &PageRequest) -> Result<(Vec<Room>, u64), RoomError>;

    /// # Errors
    /// * `NotFound` - Room does not exist
    async fn update(&self, room: Room) -> Result<Room, RoomError>;

    /// # Errors
    /// * `NotFound` - Room does not exist
    async fn delete(&self, id: &RoomId) -> Result<(), RoomError>;
}
