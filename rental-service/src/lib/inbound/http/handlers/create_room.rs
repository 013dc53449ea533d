use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_room::RoomData;
use super::ApiError;
use super::ApiSuccess;
use crate::access::models::Principal;
use crate::inbound::http::router::AppState;
use crate::room::models::NewRoom;
use crate::room::models::RoomStatus;
use crate::room::models::RoomType;

pub async fn create_room(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CreateRoomRequest>,
) -> Result<ApiSuccess<RoomData>, ApiError> {
    state
        .room_service
        .create_room(body.into(), &principal)
        .await
        .map_err(ApiError::from)
        .map(|ref room| ApiSuccess::new(StatusCode::CREATED, room.into()))
}

/// HTTP request body for a new listing. Unknown enum values are rejected
/// by the JSON extractor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    title: String,
    description: String,
    room_type: RoomType,
    #[serde(default)]
    status: Option<RoomStatus>,
    area: f64,
    price_per_month: i64,
    deposit: i64,
    max_occupants: i32,
    floor: i32,
}

impl From<CreateRoomRequest> for NewRoom {
    fn from(body: CreateRoomRequest) -> Self {
        NewRoom {
            title: body.title,
            description: body.description,
            room_type: body.room_type,
            status: body.status,
            area: body.area,
            price_per_month: body.price_per_month,
            deposit: body.deposit,
            max_occupants: body.max_occupants,
            floor: body.floor,
        }
    }
}
