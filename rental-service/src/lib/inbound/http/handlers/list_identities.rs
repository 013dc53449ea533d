use auth::Role;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::me::ProfileData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::page::Page;
use crate::domain::page::PageRequest;
use crate::identity::errors::IdentityError;
use crate::identity::models::Profile;
use crate::inbound::http::router::AppState;

pub async fn list_identities(
    State(state): State<AppState>,
    Query(params): Query<ListIdentitiesParams>,
) -> Result<ApiSuccess<ListIdentitiesResponseData>, ApiError> {
    let page = PageRequest::new(
        params.page.unwrap_or(1),
        params.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
    )
    .map_err(IdentityError::from)?;

    // Unknown role values list every identity.
    let role = params.role.as_deref().and_then(|r| r.parse::<Role>().ok());

    state
        .auth_service
        .list_identities(page, role)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListIdentitiesParams {
    page: Option<u32>,
    limit: Option<u32>,
    role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListIdentitiesResponseData {
    pub users: Vec<ProfileData>,
    pub pagination: PaginationData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationData {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> From<&Page<T>> for PaginationData {
    fn from(page: &Page<T>) -> Self {
        Self {
            current_page: page.request.page(),
            total_pages: page.total_pages(),
            total_items: page.total,
            items_per_page: page.request.limit(),
            has_next_page: page.has_next_page(),
            has_previous_page: page.has_previous_page(),
        }
    }
}

impl From<&Page<Profile>> for ListIdentitiesResponseData {
    fn from(page: &Page<Profile>) -> Self {
        Self {
            users: page.items.iter().map(ProfileData::from).collect(),
            pagination: page.into(),
        }
    }
}
