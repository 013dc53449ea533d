use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::room::errors::RoomError;
use crate::room::models::Room;
use crate::room::models::RoomId;
use crate::room::models::RoomStatus;
use crate::room::models::RoomType;

pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<ApiSuccess<RoomData>, ApiError> {
    let room_id = RoomId::from_string(&room_id).map_err(RoomError::from)?;

    state
        .room_service
        .get_room(&room_id)
        .await
        .map_err(ApiError::from)
        .map(|ref room| ApiSuccess::new(StatusCode::OK, room.into()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub room_type: RoomType,
    pub status: RoomStatus,
    pub area: f64,
    pub price_per_month: i64,
    pub deposit: i64,
    pub max_occupants: i32,
    pub floor: i32,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Room> for RoomData {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            title: room.title.clone(),
            description: room.description.clone(),
            room_type: room.room_type,
            status: room.status,
            area: room.area,
            price_per_month: room.price_per_month,
            deposit: room.deposit,
            max_occupants: room.max_occupants,
            floor: room.floor,
            owner_id: room.owner_id.to_string(),
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}
