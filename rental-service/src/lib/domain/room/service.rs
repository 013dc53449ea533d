use std::sync::Arc;

use async_trait::async_trait;

use crate::access::models::Principal;
use crate::domain::page::Page;
use crate::domain::page::PageRequest;
use crate::room::errors::RoomError;
use crate::room::models::NewRoom;
use crate::room::models::Room;
use crate::room::models::RoomId;
use crate::room::models::RoomUpdate;
use crate::room::ports::RoomRepository;
use crate::room::ports::RoomServicePort;

/// Domain service for room listings.
pub struct RoomService<R>
where
    R: RoomRepository,
{
    repository: Arc<R>,
}

impl<R> RoomService<R>
where
    R: RoomRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn owned_room(&self, id: &RoomId, caller: &Principal) -> Result<Room, RoomError> {
        let room = self.get_room(id).await?;

        if !caller.is_admin() && !room.is_owned_by(&caller.id) {
            tracing::warn!(room_id = %id, identity_id = %caller.id, "Room modification by non-owner");
            return Err(RoomError::NotOwner);
        }

        Ok(room)
    }
}

#[async_trait]
impl<R> RoomServicePort for RoomService<R>
where
    R: RoomRepository,
{
    async fn create_room(&self, listing: NewRoom, owner: &Principal) -> Result<Room, RoomError> {
        let room = Room::create(listing, owner.id)?;
        let room = self.repository.insert(room).await?;

        tracing::info!(room_id = %room.id, owner_id = %room.owner_id, "Room created");

        Ok(room)
    }

    async fn list_rooms(&self, page: PageRequest) -> Result<Page<Room>, RoomError> {
        let (rooms, total) = self.repository.list(&page).await?;
        Ok(Page::new(rooms, total, page))
    }

    async fn get_room(&self, id: &RoomId) -> Result<Room, RoomError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(RoomError::NotFound(id.to_string()))
    }

    async fn update_room(
        &self,
        id: &RoomId,
        update: RoomUpdate,
        caller: &Principal,
    ) -> Result<Room, RoomError> {
        let room = self.owned_room(id, caller).await?;
        let room = self.repository.update(room.apply(update)?).await?;

        tracing::info!(room_id = %room.id, identity_id = %caller.id, "Room updated");

        Ok(room)
    }

    async fn delete_room(&self, id: &RoomId, caller: &Principal) -> Result<(), RoomError> {
        self.owned_room(id, caller).await?;
        self.repository.delete(id).await?;

        tracing::info!(room_id = %id, identity_id = %caller.id, "Room deleted");

        Ok(())
    }
}
