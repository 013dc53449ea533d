use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::me::ProfileData;
use super::ApiError;
use super::ApiSuccess;
use crate::access::models::Principal;
use crate::identity::models::CreateAdminCommand;
use crate::inbound::http::router::AppState;

pub async fn create_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CreateAdminRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    if body.password.is_empty() {
        return Err(ApiError::UnprocessableEntity(
            "Password is required".to_string(),
        ));
    }

    let command = CreateAdminCommand {
        full_name: body.full_name,
        email: body.email,
        password: body.password,
    };

    let profile = state.auth_service.create_admin(command).await?;

    tracing::info!(created_by = %principal.id, identity_id = %profile.id, "Admin created via API");

    Ok(ApiSuccess::new(StatusCode::CREATED, (&profile).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    #[serde(default)]
    full_name: Option<String>,
    email: String,
    password: String,
}
