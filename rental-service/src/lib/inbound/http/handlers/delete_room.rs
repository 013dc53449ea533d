use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::access::models::Principal;
use crate::inbound::http::router::AppState;
use crate::room::errors::RoomError;
use crate::room::models::RoomId;

pub async fn delete_room(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(room_id): Path<String>,
) -> Result<ApiSuccess<DeleteRoomResponseData>, ApiError> {
    let room_id = RoomId::from_string(&room_id).map_err(RoomError::from)?;

    state
        .room_service
        .delete_room(&room_id, &principal)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteRoomResponseData {
                    success: true,
                    message: "Room deleted successfully".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteRoomResponseData {
    pub success: bool,
    pub message: String,
}
