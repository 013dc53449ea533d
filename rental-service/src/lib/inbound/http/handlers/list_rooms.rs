use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::get_room::RoomData;
use super::list_identities::PaginationData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::page::Page;
use crate::domain::page::PageRequest;
use crate::inbound::http::router::AppState;
use crate::room::errors::RoomError;
use crate::room::models::Room;

pub async fn list_rooms(
    State(state): State<AppState>,
    Query(params): Query<ListRoomsParams>,
) -> Result<ApiSuccess<ListRoomsResponseData>, ApiError> {
    let page = PageRequest::new(
        params.page.unwrap_or(1),
        params.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
    )
    .map_err(RoomError::from)?;

    state
        .room_service
        .list_rooms(page)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRoomsParams {
    page: Option<u32>,
    limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRoomsResponseData {
    pub rooms: Vec<RoomData>,
    pub pagination: PaginationData,
}

impl From<&Page<Room>> for ListRoomsResponseData {
    fn from(page: &Page<Room>) -> Self {
        Self {
            rooms: page.items.iter().map(RoomData::from).collect(),
            pagination: page.into(),
        }
    }
}
