use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::identity::models::RoleCounts;
use crate::inbound::http::router::AppState;

pub async fn identity_stats(
    State(state): State<AppState>,
) -> Result<ApiSuccess<IdentityStatsResponseData>, ApiError> {
    state
        .auth_service
        .identity_stats()
        .await
        .map_err(ApiError::from)
        .map(|counts| ApiSuccess::new(StatusCode::OK, counts.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityStatsResponseData {
    pub total_users: u64,
    pub users_by_role: UsersByRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsersByRole {
    pub admins: u64,
    pub collaborators: u64,
    pub customers: u64,
}

impl From<RoleCounts> for IdentityStatsResponseData {
    fn from(counts: RoleCounts) -> Self {
        Self {
            total_users: counts.total(),
            users_by_role: UsersByRole {
                admins: counts.admins,
                collaborators: counts.collaborators,
                customers: counts.customers,
            },
        }
    }
}
