use axum::extract::Path;
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
use crate::room::errors::RoomError;
use crate::room::models::RoomId;
use crate::room::models::RoomStatus;
use crate::room::models::RoomType;
use crate::room::models::RoomUpdate;

pub async fn update_room(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(room_id): Path<String>,
    Json(body): Json<UpdateRoomRequest>,
) -> Result<ApiSuccess<RoomData>, ApiError> {
    let room_id = RoomId::from_string(&room_id).map_err(RoomError::from)?;

    state
        .room_service
        .update_room(&room_id, body.into(), &principal)
        .await
        .map_err(ApiError::from)
        .map(|ref room| ApiSuccess::new(StatusCode::OK, room.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateRoomRequest {
    title: Option<String>,
    description: Option<String>,
    room_type: Option<RoomType>,
    status: Option<RoomStatus>,
    area: Option<f64>,
    price_per_month: Option<i64>,
    deposit: Option<i64>,
    max_occupants: Option<i32>,
    floor: Option<i32>,
}

impl From<UpdateRoomRequest> for RoomUpdate {
    fn from(body: UpdateRoomRequest) -> Self {
        RoomUpdate {
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
