use std::collections::HashMap;

use async_trait::async_trait;
use auth::Role;
use tokio::sync::RwLock;

use crate::domain::page::PageRequest;
use crate::identity::errors::IdentityError;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::RoleCounts;
use crate::identity::ports::CredentialStore;
use crate::room::errors::RoomError;
use crate::room::models::Room;
use crate::room::models::RoomId;
use crate::room::ports::RoomRepository;

/// Newest first, then the requested window.
fn paginate<T>(
    mut items: Vec<T>,
    page: &PageRequest,
    created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> (Vec<T>, u64) {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    let total = items.len() as u64;

    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();

    (items, total)
}

/// Credential store held in process memory.
///
/// Data is lost when the process exits. Used by tests and local runs
/// without a database.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    identities: RwLock<HashMap<IdentityId, Identity>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop an identity. Tokens already issued to it stay well-formed.
    pub async fn remove(&self, id: &IdentityId) -> Option<Identity> {
        self.identities.write().await.remove(id)
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.write().await;

        let email = identity.email.as_str().to_lowercase();
        if identities
            .values()
            .any(|existing| existing.email.as_str().to_lowercase() == email)
        {
            return Err(IdentityError::EmailTaken);
        }

        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        Ok(self.identities.read().await.get(id).cloned())
    }

    async fn find_by_email_case_insensitive(
        &self,
        email: &str,
    ) -> Result<Option<Identity>, IdentityError> {
        let email = email.to_lowercase();

        Ok(self
            .identities
            .read()
            .await
            .values()
            .find(|identity| identity.email.as_str().to_lowercase() == email)
            .cloned())
    }

    async fn list(
        &self,
        page: &PageRequest,
        role: Option<Role>,
    ) -> Result<(Vec<Identity>, u64), IdentityError> {
        let matching: Vec<Identity> = self
            .identities
            .read()
            .await
            .values()
            .filter(|identity| role.map_or(true, |role| identity.role == role))
            .cloned()
            .collect();

        Ok(paginate(matching, page, |identity| identity.created_at))
    }

    async fn count_by_role(&self) -> Result<RoleCounts, IdentityError> {
        let mut counts = RoleCounts::default();
        for identity in self.identities.read().await.values() {
            counts.add(identity.role, 1);
        }
        Ok(counts)
    }
}

/// Room repository held in process memory.
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: RwLock<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert(&self, room: Room) -> Result<Room, RoomError> {
        self.rooms.write().await.insert(room.id, room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, RoomError> {
        Ok(self.rooms.read().await.get(id).cloned())
    }

    async fn list(&self, page: &PageRequest) -> Result<(Vec<Room>, u64), RoomError> {
        let rooms: Vec<Room> = self.rooms.read().await.values().cloned().collect();
        Ok(paginate(rooms, page, |room| room.created_at))
    }

    async fn update(&self, room: Room) -> Result<Room, RoomError> {
        match self.rooms.write().await.get_mut(&room.id) {
            Some(stored) => {
                *stored = room.clone();
                Ok(room)
            }
            None => Err(RoomError::NotFound(room.id.to_string())),
        }
    }

    async fn delete(&self, id: &RoomId) -> Result<(), RoomError> {
        self.rooms
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(RoomError::NotFound(id.to_string()))
    }
}
